//! # ems-storage
//!
//! Storage abstraction traits for the employee management simulator.
//!
//! This crate defines the provider interface that concrete storage
//! backends implement, together with the search criteria and error types
//! shared by every backend.
//!
//! ## Provider Traits
//!
//! - [`EmployeeProvider`] - lookup, search and CRUD operations for employees

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod employee;
pub mod error;

pub use employee::{EmployeeProvider, EmployeeSearchCriteria};
pub use error::{StorageError, StorageResult};
