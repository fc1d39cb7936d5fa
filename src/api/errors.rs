use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::DomainError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "msg": self.message
        }));

        (self.status, body).into_response()
    }
}

/// Maps domain failures onto the public status table.
/// Forbidden is reported as 401 to match the existing client contract.
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg)
            | DomainError::Conflict(msg)
            | DomainError::InvalidState(msg) => Self::bad_request(msg),
            DomainError::InvalidCredentials => {
                Self::bad_request(DomainError::InvalidCredentials.to_string())
            }
            DomainError::Unauthorized(msg) | DomainError::Forbidden(msg) => Self::unauthorized(msg),
            DomainError::NotFound(msg) => Self::not_found(msg),
            DomainError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                Self::internal_server_error("Server Error")
            }
        }
    }
}
