//! Site HTTP Routes
//!
//! The non-CMS endpoints the public site uses: a health check and the
//! contact form. Contact messages are validated for presence only, logged,
//! and appended to the `contact_messages` section of the content store so
//! they survive restarts.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::content::ContentError;
use crate::observability::Logger;

use super::content_routes::ContentState;
use super::response::ApiResponse;

/// Section that collects contact form submissions
const CONTACT_SECTION: &str = "contact_messages";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    server: &'static str,
    environment: String,
    timestamp: String,
}

/// Build the site router
pub fn site_routes(state: Arc<ContentState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/contact", post(contact))
        .with_state(state)
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        server: "foliocms",
        environment: std::env::var("FOLIO_ENV").unwrap_or_else(|_| "development".to_string()),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// POST /contact
///
/// The body is checked field by field rather than deserialized into a
/// struct so a missing field yields the site's own 400 envelope instead of
/// an extractor rejection.
async fn contact(
    State(state): State<Arc<ContentState>>,
    Json(body): Json<Value>,
) -> Result<Json<ApiResponse<Value>>, ContentError> {
    let field = |name: &str| -> Option<String> {
        body.get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let (Some(name), Some(email), Some(message)) =
        (field("name"), field("email"), field("message"))
    else {
        return Err(ContentError::MalformedInput(
            "All fields are required".to_string(),
        ));
    };

    Logger::info(
        "CONTACT_MESSAGE",
        &[("name", &name), ("email", &email), ("message", &message)],
    );

    state
        .mutate(|doc| {
            doc.ensure_items_section(CONTACT_SECTION, "Contact Messages");
            doc.create_item(
                CONTACT_SECTION,
                json!({
                    "name": name,
                    "email": email,
                    "message": message,
                    "received_at": Utc::now().to_rfc3339(),
                }),
            )
        })
        .await?;

    Ok(Json(ApiResponse::message_only(
        "Message received successfully! We will get back to you soon.",
    )))
}
