use std::time::Duration;

/// Name of the queue holding pending URLs
pub const QUEUE_NAME: &str = "links";

/// Default seconds a worker waits on an empty queue
pub const DEFAULT_RECEIVE_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for Frontier-Ripple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub broker: BrokerConfig,
    pub worker: WorkerConfig,
}

/// Message broker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    /// AMQP connection string (`RABBITMQ_URL`)
    pub url: String,

    /// Queue the frontier lives in
    pub queue_name: String,

    /// Declares the queue durable and publishes messages as persistent.
    /// One flag drives both so they can never disagree.
    pub durable: bool,
}

/// Crawl worker behavior configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// How long a receive blocks before reporting an empty queue (`TIMEOUT`)
    pub receive_timeout: Duration,

    /// Log a progress line every this many handled messages
    pub progress_interval: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            receive_timeout: Duration::from_secs(DEFAULT_RECEIVE_TIMEOUT_SECS),
            progress_interval: 10,
        }
    }
}

impl BrokerConfig {
    /// AMQP delivery mode matching the queue's durability (2 = persistent)
    pub fn delivery_mode(&self) -> u8 {
        if self.durable {
            2
        } else {
            1
        }
    }
}
