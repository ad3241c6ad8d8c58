//! Short code resolution service.

use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_valid_short_code;
use crate::utils::url_validator::is_valid_url;

/// Service for resolving short codes back to their original URLs.
///
/// Malformed codes, unknown codes and stored URLs that no longer validate all
/// resolve to `None`. Only storage failures are reported as errors.
pub struct RedirectService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves a short code to its record.
    ///
    /// The stored URL is validated again before it is returned, so a corrupt
    /// row is never used as a redirect target.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        if !is_valid_short_code(code) {
            return Ok(None);
        }

        let Some(record) = self.repository.find_by_code(code).await? else {
            return Ok(None);
        };

        if !is_valid_url(&record.original_url) {
            warn!(
                code = %record.short_code,
                id = record.id,
                "Stored URL failed validation, refusing to redirect"
            );
            return Ok(None);
        }

        Ok(Some(record))
    }
}
