//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`              - Service status and storage health
//! - `POST /api/shorten`   - Create a short URL
//! - `GET  /{code}`        - Short link redirect
//! - anything else         - 404 HTML page
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Headers** - CORS and security headers, `OPTIONS` short-circuit
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler, redirect_handler};
use crate::api::middleware::{headers, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and middleware.
///
/// Integration tests drive this directly; the server wraps it with
/// [`app_router`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(headers::layer))
        .layer(tracing::layer())
}

/// Constructs the application service with trailing slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
