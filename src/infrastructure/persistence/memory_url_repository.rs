//! Process-local implementation of the URL repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// A repository that keeps records in memory.
///
/// Enforces the same short code uniqueness as the PostgreSQL schema: the
/// existence check and the insert happen under one write lock.
///
/// # Use Cases
///
/// - Development without a database (`STORAGE_BACKEND=memory`)
/// - HTTP tests
///
/// Records are lost when the process exits.
pub struct InMemoryUrlRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    records: HashMap<String, UrlRecord>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory URL repository");
        Self {
            state: RwLock::new(MemoryState::default()),
        }
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.state.read().await.records.contains_key(code))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.state.read().await.records.get(code).cloned())
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut state = self.state.write().await;

        if state.records.contains_key(&new_record.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "urls_short_code_key" }),
            ));
        }

        state.last_id += 1;
        let record = UrlRecord::new(
            state.last_id,
            new_record.original_url,
            new_record.short_code,
            Utc::now(),
        );
        state
            .records
            .insert(record.short_code.clone(), record.clone());

        Ok(record)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.state.read().await.records.len() as i64)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        let state = self.state.read().await;

        let mut records: Vec<UrlRecord> = state.records.values().cloned().collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(records)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
