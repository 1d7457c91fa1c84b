//! Admin auth flow tests
//!
//! Login, session check, logout, and password change through the HTTP
//! surface, against a bootstrapped credentials file.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use foliocms::auth::credentials::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};
use foliocms::auth::{CredentialsFile, SessionRegistry};
use foliocms::content::ContentStore;
use foliocms::http_server::{AuthState, ContentState, HttpServer, HttpServerConfig};

fn test_app(temp: &TempDir) -> Router {
    let content = Arc::new(ContentState::new(ContentStore::new(
        temp.path().join("content.json"),
    )));
    let credentials = CredentialsFile::new(temp.path().join("admin.json"));
    credentials.bootstrap().unwrap();
    let auth = Arc::new(AuthState::new(credentials, SessionRegistry::default()));
    HttpServer::new(HttpServerConfig::default(), content, auth).router()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await
}

#[tokio::test]
async fn test_login_with_default_credentials() {
    let temp = TempDir::new().unwrap();
    let app = test_app(&temp);

    let (status, body) = login(&app, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let temp = TempDir::new().unwrap();
    let app = test_app(&temp);

    let (status, body) = login(&app, DEFAULT_ADMIN_EMAIL, "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_session_check_and_logout() {
    let temp = TempDir::new().unwrap();
    let app = test_app(&temp);

    let (_, body) = login(&app, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/auth/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["email"], DEFAULT_ADMIN_EMAIL);

    let (status, _) = send(&app, "POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // logout invalidates immediately
    let (_, body) = send(&app, "GET", "/auth/session", Some(&token), None).await;
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn test_session_check_without_token() {
    let temp = TempDir::new().unwrap();
    let app = test_app(&temp);

    let (status, body) = send(&app, "GET", "/auth/session", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn test_change_password_requires_session() {
    let temp = TempDir::new().unwrap();
    let app = test_app(&temp);

    let (status, _) = send(
        &app,
        "POST",
        "/auth/password",
        None,
        Some(json!({"old_password": DEFAULT_ADMIN_PASSWORD, "new_password": "fresh-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password_flow() {
    let temp = TempDir::new().unwrap();
    let app = test_app(&temp);

    let (_, body) = login(&app, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await;
    let token = body["token"].as_str().unwrap().to_string();

    // wrong current password is rejected
    let (status, _) = send(
        &app,
        "POST",
        "/auth/password",
        Some(&token),
        Some(json!({"old_password": "guess", "new_password": "fresh-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/auth/password",
        Some(&token),
        Some(json!({"old_password": DEFAULT_ADMIN_PASSWORD, "new_password": "fresh-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // old password no longer works, new one does
    let (status, _) = login(&app, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = login(&app, DEFAULT_ADMIN_EMAIL, "fresh-password").await;
    assert_eq!(status, StatusCode::OK);
}
