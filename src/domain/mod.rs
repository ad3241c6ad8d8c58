//! Domain layer containing business entities and the storage contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
