//! # HTTP Server
//!
//! Combines the content, site, and auth routers into one application.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::Logger;

use super::auth_routes::{auth_routes, AuthState};
use super::config::HttpServerConfig;
use super::content_routes::{content_routes, ContentState};
use super::site_routes::site_routes;

/// HTTP server for the portfolio site and its admin panel
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server from its configuration and shared states
    pub fn new(
        config: HttpServerConfig,
        content: Arc<ContentState>,
        auth: Arc<AuthState>,
    ) -> Self {
        let router = Self::build_router(&config, content, auth);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(
        config: &HttpServerConfig,
        content: Arc<ContentState>,
        auth: Arc<AuthState>,
    ) -> Router {
        // Permissive CORS when no origins are configured (the original site
        // ran with open CORS in development)
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let mut origins: Vec<HeaderValue> = Vec::new();
            for origin in &config.cors_origins {
                match origin.parse() {
                    Ok(value) => origins.push(value),
                    // a typo here would otherwise silently narrow CORS
                    Err(_) => Logger::warn("CORS_ORIGIN_INVALID", &[("origin", origin.as_str())]),
                }
            }

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            // Content API and site endpoints under /api
            .nest(
                "/api",
                content_routes(content.clone()).merge(site_routes(content)),
            )
            // Auth surface under /auth
            .nest("/auth", auth_routes(auth))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{}", e))
        })?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info("SERVER_STARTED", &[("addr", &addr.to_string())]);

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
