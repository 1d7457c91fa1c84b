//! Auth HTTP Routes
//!
//! The authentication gate's HTTP surface: login, logout, session check,
//! and password change. Content routes trust that mutating callers have
//! already passed this gate.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, AuthResult, CredentialsFile, SessionRegistry};

// ==================
// Shared State
// ==================

/// Auth state shared across handlers
pub struct AuthState {
    pub credentials: CredentialsFile,
    pub sessions: SessionRegistry,
}

impl AuthState {
    pub fn new(credentials: CredentialsFile, sessions: SessionRegistry) -> Self {
        Self {
            credentials,
            sessions,
        }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub success: bool,
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

// ==================
// Router
// ==================

/// Build the auth router
pub fn auth_routes(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session_status))
        .route("/password", post(change_password))
        .with_state(state)
}

/// Pull the bearer token out of the Authorization header
fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AuthError::SessionInvalid)
}

// ==================
// Handlers
// ==================

/// POST /login
async fn login(
    State(state): State<Arc<AuthState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    state.credentials.verify(&body.email, &body.password)?;
    let (token, session) = state.sessions.create(&body.email)?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful!".to_string(),
        token,
        expires_at: session.expires_at,
    }))
}

/// POST /logout
async fn logout(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, AuthError> {
    if let Ok(token) = bearer_token(&headers) {
        state.sessions.revoke(token)?;
    }
    Ok(Json(StatusResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}

/// GET /session
///
/// Always 200; `authenticated` tells the panel whether to show the login
/// screen.
async fn session_status(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse> {
    let session = bearer_token(&headers)
        .ok()
        .and_then(|token| state.sessions.validate(token).ok());

    Json(SessionStatusResponse {
        success: true,
        authenticated: session.is_some(),
        email: session.map(|s| s.email),
    })
}

/// POST /password
async fn change_password(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<StatusResponse>, AuthError> {
    let token = bearer_token(&headers)?;
    state.sessions.validate(token)?;

    state
        .credentials
        .change_password(&body.old_password, &body.new_password)?;

    Ok(Json(StatusResponse {
        success: true,
        message: "Password changed successfully!".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_router_builds() {
        let temp = TempDir::new().unwrap();
        let credentials = CredentialsFile::new(temp.path().join("admin.json"));
        let state = Arc::new(AuthState::new(credentials, SessionRegistry::default()));
        let _router = auth_routes(state);
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert("authorization", "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");

        headers.insert("authorization", "Basic abc123".parse().unwrap());
        assert!(bearer_token(&headers).is_err());
    }
}
