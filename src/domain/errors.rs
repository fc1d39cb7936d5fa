use thiserror::Error;

use crate::domain::repositories::RepositoryError;

/// Failures raised by the identity store and the pickup lifecycle
///
/// Each variant corresponds to one row of the HTTP error table; the API
/// layer decides the status code, the domain only names the failure.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Duplicate identity (username or mobile number)
    #[error("{0}")]
    Conflict(String),

    /// Login failed; deliberately does not say which part was wrong
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// Missing, malformed or expired token
    #[error("{0}")]
    Unauthorized(String),

    /// Caller has no rights over the resource
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Transition precondition not met
    #[error("{0}")]
    InvalidState(String),

    /// Unexpected fault; message is for logs only
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate { field } => {
                DomainError::Conflict(format!("User with this {} already exists", field))
            }
            RepositoryError::Backend(message) => DomainError::Internal(message),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
