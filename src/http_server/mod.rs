//! # HTTP Server
//!
//! Axum routers for the content API, the site endpoints (health, contact),
//! and the admin auth surface, plus the combined server entry point.

pub mod auth_routes;
pub mod config;
pub mod content_routes;
pub mod response;
pub mod server;
pub mod site_routes;

pub use auth_routes::{auth_routes, AuthState};
pub use config::HttpServerConfig;
pub use content_routes::{content_routes, ContentState};
pub use response::ApiResponse;
pub use server::HttpServer;
pub use site_routes::site_routes;
