//! Repository trait for short URL data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for URL records.
///
/// The store must enforce uniqueness of `short_code` atomically: when two
/// callers insert the same code concurrently, exactly one succeeds and the
/// other receives [`AppError::Conflict`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Returns `true` if a record with this exact short code exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on storage errors.
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Finds a record by its exact short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Inserts a new record, assigning `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    ///
    /// Returns [`AppError::Storage`] on storage errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Counts all stored records.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists the most recently created records, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError>;

    /// Checks whether the backing store is reachable.
    async fn health_check(&self) -> bool;
}
