//! # ems-cli
//!
//! Command-line front end for the employee management simulator.
//!
//! This crate provides:
//! - The API and provider simulations (`ems simulate api|provider`)
//! - Employee administration through the service layer (`ems employee ...`)
//! - Credential checks and login flows through the provider (`ems auth ...`)
//! - Configuration management (`ems config ...`)

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::future_not_send)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod simulate;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
