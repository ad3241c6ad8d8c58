//! Fallback handlers for unknown paths and unsupported methods.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// Template for the generic not found page.
///
/// Renders `templates/not_found.html`. It intentionally takes no input so
/// the page is identical for every kind of miss.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {}

/// Builds the 404 HTML response.
pub(crate) fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, NotFoundTemplate {}).into_response()
}

/// Router fallback for paths no route matches.
pub async fn not_found_handler() -> Response {
    not_found_page()
}

/// Method fallback for `/api/shorten`.
///
/// # Errors
///
/// Always returns [`AppError::MethodNotAllowed`] (405).
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}
