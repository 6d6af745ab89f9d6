//! End-to-end tests.
//!
//! These run the service, the user storage provider and both simulations
//! against a fresh SQLite database per test.

mod employee_service;
mod provider_flow;
mod simulations;
