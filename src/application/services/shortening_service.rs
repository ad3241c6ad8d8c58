//! Short URL creation service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{base_code, encode_base62};
use crate::utils::url_validator::{is_valid_url, sanitize_url};

/// Length of the hash-derived prefix while the suffix is one digit.
const PRIMARY_BASE_LENGTH: usize = 7;

/// Length of the hash-derived prefix once the suffix needs two digits.
const FALLBACK_BASE_LENGTH: usize = 6;

/// Number of one-digit suffixes (`0`..`Z`).
const SINGLE_SUFFIX_SPACE: u32 = 62;

/// Number of increments that still fit in a two-digit suffix (62²).
const SUFFIX_SPACE: u32 = 62 * 62;

/// Service for creating short URLs.
///
/// Validates and sanitizes the input, derives a deterministic code with the
/// hash-plus-increment scheme and persists the record. The same URL may be
/// shortened any number of times; each call yields a new code.
pub struct ShorteningService<R: ?Sized> {
    repository: Arc<R>,
    base_url: String,
}

impl<R: UrlRepository + ?Sized> ShorteningService<R> {
    /// Creates a new shortening service.
    ///
    /// `base_url` is the public origin that prefixes short codes in
    /// [`Self::short_url`].
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into(),
        }
    }

    /// Creates and persists a short URL for `raw_url`.
    ///
    /// # Flow
    ///
    /// 1. Validate the trimmed input
    /// 2. Sanitize it and validate the result again
    /// 3. Walk the candidate codes (`base7 + 0..Z`, then `base6 + 10..ZZ`) and insert the
    ///    first one the store does not know
    /// 4. If another request took that code between the check and the
    ///    insert, continue with the next candidate
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is rejected.
    ///
    /// Returns [`AppError::CollisionExhausted`] if every candidate code is
    /// taken, whether found by the existence check or by a failed insert.
    ///
    /// Returns [`AppError::Storage`] on storage errors.
    pub async fn create_short_url(&self, raw_url: &str) -> Result<UrlRecord, AppError> {
        let trimmed = raw_url.trim();
        if !is_valid_url(trimmed) {
            return Err(invalid_url(trimmed));
        }

        let url = sanitize_url(trimmed);
        if !is_valid_url(&url) {
            return Err(invalid_url(trimmed));
        }

        let base = base_code(&url, PRIMARY_BASE_LENGTH);
        let mut fallback_base: Option<String> = None;

        for increment in 0..SUFFIX_SPACE {
            let short_code = candidate_code(&url, &base, &mut fallback_base, increment);

            if self.repository.exists_by_code(&short_code).await? {
                continue;
            }

            let new_record = NewUrlRecord {
                original_url: url.clone(),
                short_code,
            };

            match self.repository.insert(new_record).await {
                Ok(record) => {
                    if increment > 0 {
                        debug!(increment, code = %record.short_code, "Resolved short code collision");
                    }
                    debug!(code = %record.short_code, id = record.id, "Short URL created");
                    return Ok(record);
                }
                Err(AppError::Conflict { details, .. }) => {
                    warn!(increment, ?details, "Short code taken concurrently, trying next candidate");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CollisionExhausted {
            attempts: SUFFIX_SPACE,
        })
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

/// Candidate code for one step of the collision walk.
///
/// Candidates are `base7 + suffix` for increments `0..62` (one-digit
/// suffix), then `base6 + suffix` for increments `62..3844` (two-digit
/// suffix). `base6` is a fresh six-character base code, not a truncation of
/// `base7`, computed on first use. Every candidate is exactly eight
/// characters long.
fn candidate_code(
    url: &str,
    base: &str,
    fallback_base: &mut Option<String>,
    increment: u32,
) -> String {
    if increment < SINGLE_SUFFIX_SPACE {
        format!("{base}{}", encode_base62(u64::from(increment), 1))
    } else {
        let base6 = fallback_base.get_or_insert_with(|| base_code(url, FALLBACK_BASE_LENGTH));
        format!("{base6}{}", encode_base62(u64::from(increment), 2))
    }
}

fn invalid_url(url: &str) -> AppError {
    AppError::bad_request(
        "Invalid URL. Only http and https URLs up to 2048 characters are accepted",
        json!({ "url": url.chars().take(100).collect::<String>() }),
    )
}
