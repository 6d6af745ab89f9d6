//! CLI error types.

use ems_api::ApiError;
use ems_auth::AuthError;
use ems_storage::StorageError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage error.
    #[error("database error: {0}")]
    Storage(#[from] StorageError),

    /// API error.
    #[error("API error: {} - {}", .0.status_code(), .0)]
    Api(#[from] ApiError),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation cancelled.
    #[error("operation cancelled")]
    Cancelled,
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
