//! # ems-model
//!
//! Domain models for the employee management simulator.
//!
//! This crate defines the `Employee` entity, the request types used to
//! create and update employees, and the permission labels that employee
//! roles are mapped to.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod employee;
pub mod permission;

pub use employee::{Employee, EmployeeUpdate, FieldViolation, NewEmployee, roles};
pub use permission::Permission;
