//! API error types.
//!
//! Maps service failures to HTTP status codes and to the error envelope
//! returned to clients.

use std::collections::BTreeMap;

use ems_model::FieldViolation;
use ems_storage::StorageError;
use http::StatusCode;
use thiserror::Error;

use crate::dto::ApiResponse;

/// Errors that can occur in the employee API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Employee not found.
    #[error("Employee not found with ID: {0}")]
    NotFound(i64),

    /// Invalid request (e.g. duplicate email).
    #[error("{0}")]
    BadRequest(String),

    /// Request failed field validation.
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Login refused.
    #[error("Login failed")]
    Unauthorized,

    /// Insufficient permissions.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Storage layer error.
    #[error("Internal server error: {0}")]
    Storage(#[from] StorageError),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Storage(err) => match err {
                StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
                StorageError::Duplicate { .. } | StorageError::InvalidData(_) => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the error envelope.
    ///
    /// Validation failures carry a field to message map as data.
    #[must_use]
    pub fn to_response(&self) -> ApiResponse<BTreeMap<&'static str, &'static str>> {
        let mut response = ApiResponse::error(self.status_code(), self.to_string());
        if let Self::Validation(violations) = self {
            response.data = Some(violations.iter().map(|v| (v.field, v.message)).collect());
        }
        response
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
