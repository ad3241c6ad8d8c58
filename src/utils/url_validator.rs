//! URL validation and sanitization.
//!
//! Only absolute `http`/`https` URLs with a host are accepted. Validation is a
//! pure check; sanitization prepares accepted input for hashing and storage.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

/// Maximum accepted URL length, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// Schemes rejected anywhere in the input, compared case-insensitively.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:", "file:", "ftp:"];

/// Characters percent-encoded by [`sanitize_url`]. `%` is left alone so that
/// existing escapes survive.
const UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// Returns `true` if `input` is an acceptable target URL.
///
/// # Rules
///
/// 1. At most [`MAX_URL_LENGTH`] characters
/// 2. Contains none of `javascript:`, `data:`, `vbscript:`, `file:`, `ftp:`
///    (case-insensitive, anywhere in the string)
/// 3. Parses as an absolute URL with scheme `http` or `https`
/// 4. Has a non-empty host
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://www.example.com"));
/// assert!(!is_valid_url("ftp://example.com/file.txt"));
/// assert!(!is_valid_url("not-a-url"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    if input.is_empty() || input.chars().count() > MAX_URL_LENGTH {
        return false;
    }

    let lowered = input.to_ascii_lowercase();
    if BLOCKED_SCHEMES.iter().any(|scheme| lowered.contains(scheme)) {
        return false;
    }

    let Ok(url) = Url::parse(input) else {
        return false;
    };

    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

/// Cleans user input before it is hashed and stored.
///
/// # Steps
///
/// 1. Trim surrounding whitespace
/// 2. Drop control characters (including NUL)
/// 3. Prefix `http://` when no `scheme://` is present
/// 4. Percent-encode unsafe characters (space, quotes, angle brackets,
///    braces, pipe, backslash, caret, backtick and non-ASCII)
///
/// Apply only to input already accepted by [`is_valid_url`]; the result is
/// validated again before use.
pub fn sanitize_url(input: &str) -> String {
    let cleaned: String = input.trim().chars().filter(|c| !c.is_control()).collect();

    let with_scheme = if has_scheme(&cleaned) {
        cleaned
    } else {
        format!("http://{cleaned}")
    };

    utf8_percent_encode(&with_scheme, UNSAFE).to_string()
}

fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_http_and_https() {
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("https://www.example.com"));
    }

    #[test]
    fn test_valid_with_path_query_and_port() {
        assert!(is_valid_url("https://example.com/path/to/page?q=rust&lang=en"));
        assert!(is_valid_url("http://localhost:3000/test"));
        assert!(is_valid_url("http://192.168.1.1:8080/api"));
        assert!(is_valid_url("https://example.com/page#section"));
    }

    #[test]
    fn test_uppercase_scheme_is_accepted() {
        assert!(is_valid_url("HTTPS://EXAMPLE.COM/Path"));
    }

    #[test]
    fn test_missing_scheme_rejected() {
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("www.example.com/path"));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(!is_valid_url("ftp://example.com/file.txt"));
        assert!(!is_valid_url("file:///home/user/document.txt"));
        assert!(!is_valid_url("mailto:test@example.com"));
        assert!(!is_valid_url("ws://example.com/socket"));
    }

    #[test]
    fn test_dangerous_schemes_rejected() {
        assert!(!is_valid_url("javascript:alert('xss')"));
        assert!(!is_valid_url("JavaScript:alert(1)"));
        assert!(!is_valid_url("data:text/plain,Hello"));
        assert!(!is_valid_url("vbscript:msgbox(1)"));
    }

    #[test]
    fn test_dangerous_schemes_rejected_anywhere() {
        assert!(!is_valid_url("https://example.com/?next=javascript:alert(1)"));
        assert!(!is_valid_url("https://example.com/redirect?to=FTP://files"));
        assert!(!is_valid_url("https://example.com/data:blob"));
    }

    #[test]
    fn test_missing_host_rejected() {
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("http://:8080/path"));
    }

    #[test]
    fn test_length_limit() {
        let prefix = "https://example.com/";
        let fits = format!("{prefix}{}", "a".repeat(MAX_URL_LENGTH - prefix.len()));
        let too_long = format!("{fits}a");

        assert_eq!(fits.len(), MAX_URL_LENGTH);
        assert!(is_valid_url(&fits));
        assert!(!is_valid_url(&too_long));
    }

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(
            sanitize_url("  https://example.com/path \n"),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(
            sanitize_url("https://exa\0mple.com/pa\u{7}th"),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_sanitize_keeps_valid_url_unchanged() {
        let url = "https://www.example.com";
        assert_eq!(sanitize_url(url), url);

        let url = "https://example.com/search?q=rust&lang=en#top";
        assert_eq!(sanitize_url(url), url);
    }

    #[test]
    fn test_sanitize_adds_missing_scheme() {
        assert_eq!(sanitize_url("example.com/path"), "http://example.com/path");
    }

    #[test]
    fn test_sanitize_percent_encodes_unsafe_characters() {
        assert_eq!(
            sanitize_url("https://example.com/a b<c>\"d\""),
            "https://example.com/a%20b%3Cc%3E%22d%22"
        );
        assert_eq!(
            sanitize_url("https://example.com/{x}|y^z"),
            "https://example.com/%7Bx%7D%7Cy%5Ez"
        );
    }

    #[test]
    fn test_sanitize_encodes_non_ascii() {
        assert_eq!(
            sanitize_url("https://example.com/caf\u{e9}"),
            "https://example.com/caf%C3%A9"
        );
    }

    #[test]
    fn test_sanitize_preserves_existing_escapes() {
        let url = "https://example.com/path%20with%20spaces";
        assert_eq!(sanitize_url(url), url);
    }

    #[test]
    fn test_sanitized_valid_url_stays_valid() {
        for url in [
            "https://www.example.com",
            "http://localhost:3000/test",
            "https://example.com/a b",
        ] {
            assert!(is_valid_url(&sanitize_url(url)), "{url}");
        }
    }
}
