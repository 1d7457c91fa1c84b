//! # Response Formatting
//!
//! The uniform `{success, message, data}` envelope returned by every
//! mutating endpoint. Read endpoints return the raw document or section.

use serde::Serialize;
use serde_json::Value;

/// Success envelope for write operations
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<Value> {
    /// Envelope with no data payload (delete, contact)
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}
