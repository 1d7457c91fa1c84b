//! # Content Errors
//!
//! Error types for the content store and API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for content operations
pub type ContentResult<T> = Result<T, ContentError>;

/// Content store and API errors
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Section key is absent from the document
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Item id is absent from the section's item list
    #[error("Item {1} not found in section '{0}'")]
    ItemNotFound(String, i64),

    /// Section does not hold an item list where one is required
    #[error("Section '{0}' does not contain an item list")]
    InvalidShape(String),

    /// Request body fails minimal shape checks
    #[error("Invalid request body: {0}")]
    MalformedInput(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Underlying storage write failed
    #[error("Failed to persist content: {0}")]
    PersistFailure(String),
}

impl ContentError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 404 Not Found
            ContentError::SectionNotFound(_) => StatusCode::NOT_FOUND,
            ContentError::ItemNotFound(_, _) => StatusCode::NOT_FOUND,

            // 400 Bad Request
            ContentError::InvalidShape(_) => StatusCode::BAD_REQUEST,
            ContentError::MalformedInput(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            ContentError::PersistFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
///
/// All failures surface as `{success: false, message}` to match the
/// envelope the admin panel expects.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl From<ContentError> for ErrorBody {
    fn from(err: ContentError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody::from(self));
        (status, body).into_response()
    }
}
