//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::api::handlers::fallback::not_found_page;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response Codes
///
/// - **302 Found** with `Location` set to the stored URL
/// - **404 Not Found** HTML page otherwise
///
/// Malformed codes, unknown codes, stored URLs that fail validation and
/// storage errors all produce the same 404 page. Storage errors are logged.
pub async fn redirect_handler(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
) -> Response {
    let Ok(Path(code)) = code else {
        return not_found_page();
    };

    match state.redirect_service.resolve(&code).await {
        Ok(Some(record)) => match HeaderValue::from_str(&record.original_url) {
            Ok(location) => {
                debug!(code = %code, "Redirecting");
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
            Err(e) => {
                error!(code = %code, error = %e, "Stored URL is not a valid header value");
                not_found_page()
            }
        },
        Ok(None) => not_found_page(),
        Err(e) => {
            error!(code = %code, error = ?e, "Failed to resolve short code");
            not_found_page()
        }
    }
}
