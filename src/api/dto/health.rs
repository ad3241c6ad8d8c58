//! DTOs for the health check endpoint.

use serde::Serialize;

/// Envelope returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub data: HealthData,
}

#[derive(Debug, Serialize)]
pub struct HealthData {
    /// `ok` when every check passes, `degraded` otherwise.
    pub status: String,
    pub service: String,
    pub version: String,
    pub checks: HealthChecks,
    pub endpoints: Endpoints,
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub storage: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Public endpoints advertised to clients.
#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub shorten: String,
    pub redirect: String,
}
