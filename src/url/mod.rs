//! URL handling module for Frontier-Ripple
//!
//! This module provides the netloc identity used by the same-domain filter
//! and the absolute-URL check applied to queue messages.

mod netloc;

pub use netloc::{netloc, same_netloc};

use url::Url;

/// Parses a frontier URL, accepting only absolute HTTP(S) URLs
///
/// Queue bodies are plain text, so anything can arrive. A relative path or a
/// non-web scheme cannot be fetched and is rejected here.
///
/// # Examples
///
/// ```
/// use frontier_ripple::url::parse_absolute;
///
/// assert!(parse_absolute("https://example.com/a").is_some());
/// assert!(parse_absolute("/a").is_none());
/// assert!(parse_absolute("mailto:someone@example.com").is_none());
/// ```
pub fn parse_absolute(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    if is_web_scheme(&url) && url.has_host() {
        Some(url)
    } else {
        None
    }
}

/// Returns true for `http` and `https` URLs
pub fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
