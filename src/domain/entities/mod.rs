//! Core domain entities.
//!
//! Entities are plain data structures without business logic. Creation input
//! lives in a separate struct ([`NewUrlRecord`]) so that store-assigned fields
//! (`id`, `created_at`) can never be supplied by callers.

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
