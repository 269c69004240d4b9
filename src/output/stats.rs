//! Statistics for a running crawl worker
//!
//! Counters are updated by the worker loop and only ever grow. They live for
//! the process lifetime, like the dedup tracker.

use chrono::{DateTime, Utc};

/// Counters describing what one worker process has done so far
#[derive(Debug, Clone)]
pub struct WorkerStats {
    /// When the worker started
    pub started_at: DateTime<Utc>,

    /// Messages received from the queue
    pub received: u64,

    /// Received messages that the broker flagged as redelivered
    pub redelivered: u64,

    /// Messages acknowledged without work because their URL was already seen
    pub skipped: u64,

    /// Messages whose URL was fetched (successfully or not)
    pub processed: u64,

    /// Messages acknowledged without work because the body was not a usable URL
    pub rejected: u64,

    /// Fetches that ended in a non-2xx status or a transport error
    pub fetch_failures: u64,

    /// Links published back onto the queue
    pub links_published: u64,

    /// Receives that returned because the queue stayed empty
    pub timeouts: u64,
}

impl Default for WorkerStats {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerStats {
    /// Creates zeroed statistics starting now
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            received: 0,
            redelivered: 0,
            skipped: 0,
            processed: 0,
            rejected: 0,
            fetch_failures: 0,
            links_published: 0,
            timeouts: 0,
        }
    }

    /// Messages that have reached acknowledgment
    pub fn handled(&self) -> u64 {
        self.skipped + self.processed + self.rejected
    }

    /// Seconds since the worker started
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }

    /// One-line summary used for progress and shutdown logging
    pub fn summary_line(&self) -> String {
        format!(
            "{} handled ({} processed, {} skipped, {} rejected), {} fetch failures, \
             {} links published, {} redelivered, {} empty polls, up {}s",
            self.handled(),
            self.processed,
            self.skipped,
            self.rejected,
            self.fetch_failures,
            self.links_published,
            self.redelivered,
            self.timeouts,
            self.uptime_secs()
        )
    }
}

/// Logs the worker statistics at info level
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn log_statistics(stats: &WorkerStats) {
    tracing::info!("Worker statistics: {}", stats.summary_line());
}
