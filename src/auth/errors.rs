//! # Auth Errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::content::ErrorBody;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Wrong identity or secret (generic - don't leak which)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Session token absent, unknown, or past its expiry
    #[error("Session expired or invalid")]
    SessionInvalid,

    /// New password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Credentials file could not be read or written
    #[error("Credentials storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
            AuthError::HashingFailed => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            success: false,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
