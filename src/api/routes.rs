//! API route configuration.

use crate::api::handlers::{method_not_allowed_handler, shorten_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short URL
///
/// Any other method on `/shorten` is answered with 405 and a JSON error body.
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/shorten",
        post(shorten_handler).fallback(method_not_allowed_handler),
    )
}
