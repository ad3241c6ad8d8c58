//! Deterministic short code derivation.
//!
//! Short codes are built from a CRC32 checksum of the sanitized URL encoded in
//! base-62, followed by a collision suffix chosen by
//! [`crate::application::services::ShorteningService`].

use std::sync::LazyLock;

use regex::Regex;

/// Base-62 digits in value order: `0-9`, then `a-z`, then `A-Z`.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of every issued short code.
pub const SHORT_CODE_LENGTH: usize = 8;

const BASE: u64 = ALPHABET.len() as u64;

static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z]{8}$").expect("short code pattern is valid"));

/// Errors returned by [`decode_base62`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base62Error {
    #[error("Invalid base-62 digit '{0}'")]
    InvalidDigit(char),

    #[error("Base-62 value does not fit in 64 bits")]
    Overflow,
}

/// Encodes `n` in base-62, left-padded with `0` to at least `min_length` digits.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(encode_base62(0, 1), "0");
/// assert_eq!(encode_base62(61, 1), "Z");
/// assert_eq!(encode_base62(62, 2), "10");
/// assert_eq!(encode_base62(5, 3), "005");
/// ```
pub fn encode_base62(mut n: u64, min_length: usize) -> String {
    let mut digits = Vec::with_capacity(min_length.max(11));

    loop {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
        if n == 0 {
            break;
        }
    }

    while digits.len() < min_length {
        digits.push(ALPHABET[0]);
    }

    digits.iter().rev().map(|&b| b as char).collect()
}

/// Decodes a base-62 string produced by [`encode_base62`].
///
/// Leading zero digits are accepted. An empty string decodes to `0`.
///
/// # Errors
///
/// Returns [`Base62Error::InvalidDigit`] for characters outside [`ALPHABET`]
/// and [`Base62Error::Overflow`] when the value exceeds `u64::MAX`.
pub fn decode_base62(s: &str) -> Result<u64, Base62Error> {
    s.chars().try_fold(0u64, |acc, c| {
        let digit = digit_value(c).ok_or(Base62Error::InvalidDigit(c))?;
        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(Base62Error::Overflow)
    })
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        'a'..='z' => Some(c as u64 - 'a' as u64 + 10),
        'A'..='Z' => Some(c as u64 - 'A' as u64 + 36),
        _ => None,
    }
}

/// Derives the hash-based prefix of a short code.
///
/// Computes the CRC32 (IEEE) checksum of the URL bytes and encodes it in
/// base-62, padded to exactly `length` characters. When the encoding is wider
/// than `length`, only the rightmost `length` digits are kept.
///
/// The same input always yields the same base code, so repeated submissions of
/// one URL cluster under one base and are told apart by the collision suffix.
pub fn base_code(url: &str, length: usize) -> String {
    let checksum = crc32fast::hash(url.as_bytes());
    let encoded = encode_base62(u64::from(checksum), length);

    encoded[encoded.len() - length..].to_string()
}

/// Returns `true` if `code` has the shape of an issued short code:
/// exactly eight ASCII alphanumeric characters.
pub fn is_valid_short_code(code: &str) -> bool {
    SHORT_CODE_REGEX.is_match(code)
}
