//! HTTP middleware for request processing.
//!
//! Provides response header decoration and observability middleware.

pub mod headers;
pub mod tracing;
