//! Seed producer
//!
//! Fetches one user-supplied page and publishes its same-domain links to the
//! frontier. The seed URL is only published if the page links to itself, and
//! nothing is deduped beyond what the link extractor collapses within the page.

use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::parser::parse_html;
use crate::queue::FrontierQueue;
use crate::url::parse_absolute;
use crate::{ConfigError, FrontierError};
use url::Url;

/// What a seed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// The seed URL as fetched
    pub seed: String,

    /// HTTP status of the seed page, if the server answered at all
    pub status_code: Option<u16>,

    /// Links published, in publish order
    pub published: Vec<String>,
}

/// Validates the seed URL given on the command line
///
/// # Returns
///
/// * `Ok(Url)` - An absolute HTTP(S) URL with a host
/// * `Err(ConfigError::InvalidUrl)` - Anything else
pub fn parse_seed_url(raw: &str) -> Result<Url, ConfigError> {
    parse_absolute(raw).ok_or_else(|| {
        ConfigError::InvalidUrl(format!(
            "seed URL must be an absolute http(s) URL, got {:?}",
            raw
        ))
    })
}

/// Fetches the seed page and publishes each of its same-domain links once
///
/// A seed page that fails to fetch or has no qualifying links is not an
/// error: it publishes nothing and the report says so. A publish failure is
/// returned immediately; links published before it stay published.
pub async fn run_seed<F, Q>(
    seed: &Url,
    fetcher: &F,
    queue: &mut Q,
) -> Result<SeedReport, FrontierError>
where
    F: PageFetcher,
    Q: FrontierQueue,
{
    let seed_str = seed.as_str();
    tracing::info!("Fetching seed page: {}", seed_str);

    let (status_code, links) = match fetcher.fetch(seed_str).await {
        FetchResult::Success {
            status_code, body, ..
        } => {
            let parsed = parse_html(&body, seed);
            tracing::info!("Seed page: {} ({})", parsed.display_title(), seed_str);
            (Some(status_code), parsed.same_domain_links(seed))
        }
        FetchResult::HttpError { status_code } => {
            tracing::warn!("Seed page {} returned status {}", seed_str, status_code);
            (Some(status_code), Vec::new())
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("Failed to fetch seed page {}: {}", seed_str, error);
            (None, Vec::new())
        }
    };

    if links.is_empty() {
        tracing::info!("No same-domain links found on {}", seed_str);
    }

    let mut published = Vec::with_capacity(links.len());
    for link in links {
        queue.publish(&link).await?;
        tracing::info!("Published: {}", link);
        published.push(link);
    }

    Ok(SeedReport {
        seed: seed_str.to_string(),
        status_code,
        published,
    })
}
