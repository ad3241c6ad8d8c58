//! Handler for the health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, Endpoints, HealthChecks, HealthData, HealthResponse};
use crate::state::AppState;

/// Returns service status with a storage check.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response Codes
///
/// Always **200 OK**. A failing storage check is reported as
/// `"status": "degraded"` in the body.
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "URL shortener service is running",
///   "data": {
///     "status": "ok",
///     "service": "shrtn",
///     "version": "0.1.0",
///     "checks": {
///       "storage": { "status": "ok", "message": "Storage reachable" }
///     },
///     "endpoints": {
///       "shorten": "POST /api/shorten",
///       "redirect": "GET /{code}"
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = check_storage(&state).await;
    let healthy = storage.status == "ok";

    Json(HealthResponse {
        success: true,
        message: "URL shortener service is running".to_string(),
        data: HealthData {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: HealthChecks { storage },
            endpoints: Endpoints {
                shorten: "POST /api/shorten".to_string(),
                redirect: "GET /{code}".to_string(),
            },
        },
    })
}

async fn check_storage(state: &AppState) -> CheckStatus {
    if state.repository.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Storage reachable".to_string()),
        }
    } else {
        tracing::warn!("Storage health check failed");
        CheckStatus {
            status: "error".to_string(),
            message: Some("Storage unreachable".to_string()),
        }
    }
}
