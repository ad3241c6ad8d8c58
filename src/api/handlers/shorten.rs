//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://www.example.com" }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "original_url": "https://www.example.com",
///     "short_code": "4cQk2Bn0",
///     "short_url": "http://localhost:3000/4cQk2Bn0",
///     "created_at": "2025-01-01T12:00:00Z"
///   },
///   "message": "URL shortened successfully"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a missing body, a non-JSON content type,
/// malformed JSON, a missing `url` field or a rejected URL.
///
/// Returns 500 Internal Server Error on storage failures.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let url = payload.url.unwrap_or_default();
    let record = state.shortening_service.create_short_url(&url).await?;
    let short_url = state.shortening_service.short_url(&record.short_code);

    tracing::info!(code = %record.short_code, "Shortened URL");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::new(record, short_url)),
    ))
}
