//! Authentication error types.

use std::fmt;

use ems_storage::StorageError;

/// Authentication operation errors.
#[derive(Debug)]
pub enum AuthError {
    /// No employee has the given email.
    UserNotFound,
    /// The supplied password did not match.
    InvalidCredentials,
    /// The credential type is not handled by the provider.
    UnsupportedCredentialType(String),
    /// The employee has no stored credential.
    CredentialNotFound,
    /// Underlying storage failure.
    Storage(StorageError),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserNotFound => write!(f, "User not found"),
            Self::InvalidCredentials => write!(f, "Invalid password"),
            Self::UnsupportedCredentialType(kind) => {
                write!(f, "unsupported credential type: {kind}")
            }
            Self::CredentialNotFound => write!(f, "credential not found"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::Internal(msg) => write!(f, "internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
