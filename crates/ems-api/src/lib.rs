//! # ems-api
//!
//! Service layer of the employee management simulator.
//!
//! This crate exposes the employee operations the way the REST API would:
//! every call is authorized against the caller's permissions, validated,
//! and answered with DTOs, [`ApiResponse`] envelopes and HTTP status codes.
//! No listener is bound; the CLI and the simulations call the service
//! directly and print what an HTTP client would have received.
//!
//! ## Endpoints
//!
//! | Route | Allowed permissions |
//! |-------|---------------------|
//! | `GET /api/employees/{id}` | `READ_EMPLOYEES`, `FULL_ACCESS`, `CLIENT_READ` |
//! | `GET /api/employees/search` | `READ_EMPLOYEES`, `FULL_ACCESS`, `CLIENT_READ` |
//! | `POST /api/employees/add` | `CREATE_EMPLOYEES`, `FULL_ACCESS`, `CLIENT_WRITE` |
//! | `POST /api/employees/add-Multiple` | `FULL_ACCESS`, `CLIENT_WRITE` |
//! | `POST /api/employees/bulk-upload` | `FULL_ACCESS`, `CLIENT_WRITE` |
//! | `PUT /api/employees/update/{id}` | `UPDATE_EMPLOYEES`, `FULL_ACCESS`, `CLIENT_WRITE` |
//! | `DELETE /api/employees/delete/{id}` | `DELETE_EMPLOYEES`, `FULL_ACCESS`, `CLIENT_WRITE` |
//! | `POST /api/auth/login` | none |

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod access;
pub mod dto;
pub mod error;
pub mod service;

pub use access::{Endpoint, Principal};
pub use dto::{ApiResponse, EmployeeResponse, LoginRequest, LoginResponse};
pub use error::{ApiError, ApiResult};
pub use service::EmployeeService;
