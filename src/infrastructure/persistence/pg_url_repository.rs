//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for URL records.
///
/// Relies on the `urls_short_code_key` unique constraint for atomic
/// uniqueness; a violated constraint surfaces as [`AppError::Conflict`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(row.id, row.original_url, row.short_code, row.created_at)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM urls WHERE short_code = $1)",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_code, created_at
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, short_code)
            VALUES ($1, $2)
            RETURNING id, original_url, short_code, created_at
            "#,
        )
        .bind(&new_record.original_url)
        .bind(&new_record.short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_code, created_at
            FROM urls
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UrlRecord::from).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
