//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to shorten a single URL.
///
/// `url` is optional at the serde level so that a missing field is reported
/// through validation with the same error shape as an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(
        required(message = "URL is required"),
        length(min = 1, message = "URL is required")
    )]
    pub url: Option<String>,
}

/// Successful shortening response.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub success: bool,
    pub data: ShortUrlData,
    pub message: String,
}

/// The stored record as seen by API clients.
#[derive(Debug, Serialize)]
pub struct ShortUrlData {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortenResponse {
    pub fn new(record: UrlRecord, short_url: String) -> Self {
        Self {
            success: true,
            data: ShortUrlData {
                id: record.id,
                original_url: record.original_url,
                short_code: record.short_code,
                short_url,
                created_at: record.created_at,
            },
            message: "URL shortened successfully".to_string(),
        }
    }
}
