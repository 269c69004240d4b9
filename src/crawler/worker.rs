//! Crawl worker - the frontier's receive/fetch/extract/publish/ack cycle
//!
//! A worker owns one queue handle, one fetcher and one dedup tracker. It
//! processes a single message at a time:
//! 1. Receive a URL (or time out and poll again)
//! 2. Skip it if this process has already seen it
//! 3. Fetch the page; a failed fetch contributes zero links
//! 4. Extract same-domain links
//! 5. Publish the links this process has not seen yet
//! 6. Acknowledge the message
//!
//! Acknowledgment comes strictly after every publish for the message has
//! been confirmed, so a crash anywhere before it leaves the message with the
//! broker for redelivery.

use crate::config::WorkerConfig;
use crate::crawler::dedup::DedupTracker;
use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::parser::parse_html;
use crate::output::{log_statistics, WorkerStats};
use crate::queue::{FrontierMessage, FrontierQueue};
use crate::state::WorkerState;
use crate::url::parse_absolute;
use crate::FrontierError;

/// What a single poll of the queue amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The queue stayed empty for the whole receive timeout
    TimedOut,

    /// The URL was already seen by this worker; acknowledged without work
    Skipped { url: String },

    /// The body was not an absolute HTTP(S) URL; acknowledged without work
    Rejected { delivery_tag: u64 },

    /// The URL was fetched and its unseen same-domain links published
    Processed {
        url: String,
        /// Distinct same-domain links on the page (zero if the fetch failed)
        discovered: usize,
        /// Links actually published after dedup
        published: usize,
    },
}

/// Main crawl worker structure
pub struct CrawlWorker<Q, F> {
    queue: Q,
    fetcher: F,
    dedup: DedupTracker,
    config: WorkerConfig,
    state: WorkerState,
    stats: WorkerStats,
}

impl<Q, F> CrawlWorker<Q, F>
where
    Q: FrontierQueue,
    F: PageFetcher,
{
    /// Creates a new worker with an empty dedup tracker
    ///
    /// # Arguments
    ///
    /// * `queue` - The frontier queue to consume from and publish to
    /// * `fetcher` - The page fetcher
    /// * `config` - The worker configuration
    pub fn new(queue: Q, fetcher: F, config: WorkerConfig) -> Self {
        Self {
            queue,
            fetcher,
            dedup: DedupTracker::new(),
            config,
            state: WorkerState::Idle,
            stats: WorkerStats::new(),
        }
    }

    /// Replaces the dedup tracker, e.g. to start from a known set of URLs
    pub fn with_dedup(mut self, dedup: DedupTracker) -> Self {
        self.dedup = dedup;
        self
    }

    /// Current position in the processing cycle
    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Counters for everything this worker has done
    pub fn stats(&self) -> &WorkerStats {
        &self.stats
    }

    /// URLs this worker has seen
    pub fn dedup(&self) -> &DedupTracker {
        &self.dedup
    }

    /// The queue handle this worker uses
    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Consumes the worker, returning its queue handle
    pub fn into_queue(self) -> Q {
        self.queue
    }

    /// Runs the worker until a broker error occurs
    ///
    /// Empty-queue timeouts are logged and followed by another receive with
    /// the same timeout, indefinitely. Page-level failures never end the loop.
    pub async fn run(&mut self) -> Result<(), FrontierError> {
        tracing::info!(
            "Worker waiting for URLs on queue '{}' (receive timeout {}s)",
            self.queue.queue_name(),
            self.config.receive_timeout.as_secs()
        );

        loop {
            self.poll_once().await?;
        }
    }

    /// Receives at most one message and processes it to acknowledgment
    ///
    /// # Returns
    ///
    /// * `Ok(PollOutcome)` - What happened to the message, or `TimedOut`
    /// * `Err(FrontierError)` - The broker failed; the message, if any, is
    ///   left unacknowledged
    pub async fn poll_once(&mut self) -> Result<PollOutcome, FrontierError> {
        let received = self.queue.receive(self.config.receive_timeout).await?;

        let Some(message) = received else {
            self.transition(WorkerState::Idle)?;
            self.stats.timeouts += 1;
            tracing::info!(
                "No messages on queue '{}' for {}s, polling again",
                self.queue.queue_name(),
                self.config.receive_timeout.as_secs()
            );
            return Ok(PollOutcome::TimedOut);
        };

        self.transition(WorkerState::Received)?;
        let outcome = self.process_message(message).await?;

        if self.stats.handled() % self.config.progress_interval.max(1) == 0 {
            log_statistics(&self.stats);
        }

        Ok(outcome)
    }

    /// Processes a message already in this worker's custody
    async fn process_message(
        &mut self,
        message: FrontierMessage,
    ) -> Result<PollOutcome, FrontierError> {
        self.stats.received += 1;
        if message.redelivered {
            self.stats.redelivered += 1;
        }

        let Some(text) = message.text() else {
            tracing::warn!(
                "Message {} is not valid UTF-8, acknowledging without processing",
                message.delivery_tag
            );
            return self.reject(&message).await;
        };

        tracing::info!(
            "Received URL: {}{}",
            text,
            if message.redelivered { " (redelivered)" } else { "" }
        );

        let Some(base_url) = parse_absolute(text) else {
            tracing::warn!(
                "Message {} is not an absolute HTTP(S) URL: {:?}",
                message.delivery_tag,
                text
            );
            return self.reject(&message).await;
        };

        // Dedup, fetch and report all use the parsed form, the same form
        // published links take
        let url = base_url.to_string();

        if self.dedup.seen(&url) {
            tracing::info!("URL {} already processed, skipping", url);
            self.finish(&message).await?;
            self.stats.skipped += 1;
            return Ok(PollOutcome::Skipped { url });
        }
        self.dedup.mark_seen(&url);

        self.transition(WorkerState::Fetching)?;
        let links = match self.fetcher.fetch(&url).await {
            FetchResult::Success { body, .. } => {
                self.transition(WorkerState::Extracting)?;
                let parsed = parse_html(&body, &base_url);
                tracing::info!("Processing page: {} ({})", parsed.display_title(), url);
                for link in &parsed.links {
                    tracing::debug!(
                        "Found link: {} -> {}",
                        link.text.as_deref().unwrap_or(crate::crawler::parser::UNTITLED),
                        link.url
                    );
                }
                Some(parsed.same_domain_links(&base_url))
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Failed to fetch page {}, status: {}", url, status_code);
                None
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch page {}: {}", url, error);
                None
            }
        };

        self.stats.processed += 1;
        let Some(links) = links else {
            self.stats.fetch_failures += 1;
            self.finish(&message).await?;
            return Ok(PollOutcome::Processed {
                url,
                discovered: 0,
                published: 0,
            });
        };

        self.transition(WorkerState::Publishing)?;
        let discovered = links.len();
        let mut published = 0;
        for link in links {
            if self.dedup.seen(&link) {
                continue;
            }
            tracing::debug!("Publishing new link: {}", link);
            self.queue.publish(&link).await?;
            self.dedup.mark_seen(&link);
            self.stats.links_published += 1;
            published += 1;
        }
        tracing::info!("Found {} new links on {}", published, url);

        self.finish(&message).await?;

        Ok(PollOutcome::Processed {
            url,
            discovered,
            published,
        })
    }

    /// Acknowledges an unusable message
    async fn reject(&mut self, message: &FrontierMessage) -> Result<PollOutcome, FrontierError> {
        self.finish(message).await?;
        self.stats.rejected += 1;
        Ok(PollOutcome::Rejected {
            delivery_tag: message.delivery_tag,
        })
    }

    /// Acknowledges the message and returns to idle
    async fn finish(&mut self, message: &FrontierMessage) -> Result<(), FrontierError> {
        self.transition(WorkerState::Ack)?;
        self.queue.ack(message).await?;
        self.transition(WorkerState::Idle)?;
        Ok(())
    }

    fn transition(&mut self, next: WorkerState) -> Result<(), FrontierError> {
        if !self.state.can_transition_to(next) {
            return Err(FrontierError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("Worker state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}
