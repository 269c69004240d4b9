//! HTTP fetcher implementation
//!
//! This module handles the single GET request made for each frontier URL:
//! - Building the HTTP client with the crawler's user agent
//! - Classifying the response as success, HTTP error or network error
//!
//! There is no retry and no custom redirect or timeout policy; the transport
//! defaults apply. A failed fetch is never an error for the caller, it is a
//! page that contributes no links.

use async_trait::async_trait;
use reqwest::Client;

/// User agent sent with every page request
pub const USER_AGENT: &str = concat!("frontier-ripple/", env!("CARGO_PKG_VERSION"));

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page with a 2xx status
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a status outside 200-299
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS, connection refused, TLS, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body if the fetch succeeded
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if the fetch succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Capability to fetch a page by URL
///
/// The worker and the seed producer only see this trait, so tests can swap in
/// a fetcher that counts calls or serves canned pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs one GET request for `url`
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// `PageFetcher` backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds the HTTP client used for page fetches
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client (TLS backend init)
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with readable body | `Success` |
/// | any other status | `HttpError` |
/// | DNS / connect / TLS / timeout | `NetworkError` |
/// | body read or decode failure | `NetworkError` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}
