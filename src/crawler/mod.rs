//! Crawler module for the frontier roles
//!
//! This module contains the crawling logic shared by both processes:
//! - HTTP fetching with failures classified as "zero links"
//! - HTML parsing and same-domain link extraction
//! - The per-process dedup tracker
//! - The one-shot seed producer and the long-running crawl worker

mod dedup;
mod fetcher;
mod parser;
mod seed;
mod worker;

pub use dedup::DedupTracker;
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher, USER_AGENT};
pub use parser::{extract_links, parse_html, ExtractedLink, ParsedPage, UNTITLED};
pub use seed::{parse_seed_url, run_seed, SeedReport};
pub use worker::{CrawlWorker, PollOutcome};
