//! Frontier-Ripple: a queue-backed crawl frontier
//!
//! This crate distributes same-domain web crawling over a message queue. A
//! one-shot seed producer publishes the links of a starting page, and any
//! number of long-running workers consume URLs, fetch them, and publish the
//! newly discovered same-domain links back onto the same queue.

pub mod config;
pub mod crawler;
pub mod logging;
pub mod output;
pub mod queue;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Frontier-Ripple operations
///
/// Only configuration, broker and state-machine failures surface here.
/// Page-level failures (bad status, transport errors) are absorbed by the
/// fetcher and never become a `FrontierError`.
#[derive(Debug, Error)]
pub enum FrontierError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Queue error: {0}")]
    Queue(#[from] queue::QueueError),

    #[error("Invalid worker state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::WorkerState,
        to: state::WorkerState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Failed to read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Result type alias for Frontier-Ripple operations
pub type Result<T> = std::result::Result<T, FrontierError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlWorker, DedupTracker, PollOutcome};
pub use queue::{AmqpQueue, FrontierMessage, FrontierQueue, MemoryQueue};
pub use state::WorkerState;
pub use url::{netloc, same_netloc};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: FrontierError = ConfigError::Missing("RABBITMQ_URL").into();
        assert!(matches!(err, FrontierError::Config(ConfigError::Missing(_))));
        assert!(err.to_string().contains("RABBITMQ_URL"));
    }

    #[test]
    fn test_queue_error_converts() {
        let err: FrontierError = queue::QueueError::UnknownDeliveryTag(7).into();
        assert!(matches!(
            err,
            FrontierError::Queue(queue::QueueError::UnknownDeliveryTag(7))
        ));
    }

    #[test]
    fn test_invalid_transition_names_both_states() {
        let err = FrontierError::InvalidTransition {
            from: WorkerState::Idle,
            to: WorkerState::Ack,
        };
        assert_eq!(err.to_string(), "Invalid worker state transition: Idle -> Ack");
    }
}
