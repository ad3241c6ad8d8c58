//! URL record entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// A persisted mapping from a short code to its original URL.
///
/// Records are created once by the shortening service and never updated.
/// The same `original_url` may appear in several records, each with its own code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
        }
    }
}

/// Input data for inserting a new record.
///
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_record_creation() {
        let now = Utc::now();
        let record = UrlRecord::new(
            1,
            "https://example.com".to_string(),
            "0abc123X".to_string(),
            now,
        );

        assert_eq!(record.id, 1);
        assert_eq!(record.original_url, "https://example.com");
        assert_eq!(record.short_code, "0abc123X");
        assert_eq!(record.created_at, now);
    }

    #[test]
    fn test_new_url_record_creation() {
        let new_record = NewUrlRecord {
            original_url: "https://rust-lang.org".to_string(),
            short_code: "01wQ9zK0".to_string(),
        };

        assert_eq!(new_record.original_url, "https://rust-lang.org");
        assert_eq!(new_record.short_code.len(), 8);
    }
}
