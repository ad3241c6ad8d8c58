//! Utility functions for short code derivation and URL handling.
//!
//! - [`code_generator`] - Base-62 codec, CRC32 base codes, short code shape checks
//! - [`url_validator`] - URL validation and sanitization

pub mod code_generator;
pub mod url_validator;
