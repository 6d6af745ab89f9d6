//! # ems-storage-sql
//!
//! SQLx-based storage implementation for the employee management simulator.
//!
//! This crate provides SQLite storage using `SQLx`. The schema and the
//! demonstration seed data ship as embedded migrations and are applied
//! when a [`SqliteStore`] is opened.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

mod convert;
mod entities;
pub mod employee;
pub mod error;
pub mod pool;

pub use employee::SqliteEmployeeProvider;
pub use pool::{SqliteStore, StoreConfig};
