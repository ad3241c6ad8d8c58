//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::UrlRepository`] trait and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortening_service::ShorteningService`] - Validation, code generation and insert
//! - [`services::redirect_service::RedirectService`] - Short code resolution

pub mod services;
