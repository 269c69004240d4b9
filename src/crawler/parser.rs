//! HTML parser for extracting links and metadata
//!
//! This module handles parsing fetched HTML to extract:
//! - Every `<a href>` resolved to an absolute URL, with its anchor text
//! - The page title
//! - The same-domain subset of those links, which is what feeds the frontier

use crate::url::{is_web_scheme, same_netloc};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Title logged for pages without a usable `<title>`
pub const UNTITLED: &str = "Untitled";

/// A resolved anchor found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// Absolute URL after resolution against the page URL
    pub url: Url,

    /// Trimmed anchor text, if any
    pub text: Option<String>,
}

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Every resolvable anchor, in document order, duplicates included
    pub links: Vec<ExtractedLink>,
}

impl ParsedPage {
    /// Title for log lines, falling back to [`UNTITLED`]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Returns the distinct links whose netloc equals the netloc of `base_url`
    ///
    /// Order is the order of first appearance in the document.
    pub fn same_domain_links(&self, base_url: &Url) -> Vec<String> {
        let mut seen = HashSet::new();
        self.links
            .iter()
            .filter(|link| is_web_scheme(&link.url) && same_netloc(&link.url, base_url))
            .map(|link| link.url.to_string())
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }
}

/// Parses HTML content and extracts anchors and the title
///
/// # Link Extraction Rules
///
/// - Only `<a>` elements with an `href` attribute are considered
/// - `href` is resolved against `base_url` exactly as a browser would
/// - An `href` that cannot be resolved is skipped without error
/// - No normalization beyond resolution: query strings and fragments are kept
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the page was requested from
///
/// # Example
///
/// ```
/// use frontier_ripple::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links[0].url.as_str(), "https://example.com/page");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_anchors(&document, base_url),
    }
}

/// Extracts the same-domain absolute URLs a page links to
///
/// This is the link extractor contract: the result never contains a URL
/// whose netloc differs from `base_url`'s, contains each URL once, and is
/// empty when the page has no qualifying anchors.
///
/// # Example
///
/// ```
/// use frontier_ripple::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/a">A</a><a href="https://other.org/c">C</a>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links(&base_url, html), vec!["https://example.com/a".to_string()]);
/// ```
pub fn extract_links(base_url: &Url, html: &str) -> Vec<String> {
    parse_html(html, base_url).same_domain_links(base_url)
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts all resolvable anchors from the HTML document
fn extract_anchors(document: &Html, base_url: &Url) -> Vec<ExtractedLink> {
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Ok(url) = base_url.join(href) else {
            tracing::trace!("Skipping unresolvable href {:?} on {}", href, base_url);
            continue;
        };

        let text = element.text().collect::<String>().trim().to_string();
        links.push(ExtractedLink {
            url,
            text: Some(text).filter(|t| !t.is_empty()),
        });
    }

    links
}
