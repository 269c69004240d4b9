//! Configuration module for Frontier-Ripple
//!
//! This module loads configuration from environment variables (optionally
//! seeded from a `.env` file) and validates it.
//!
//! # Example
//!
//! ```no_run
//! use frontier_ripple::config::load_config;
//!
//! let config = load_config().unwrap();
//! println!("Worker receive timeout: {:?}", config.worker.receive_timeout);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrokerConfig, Config, WorkerConfig, DEFAULT_RECEIVE_TIMEOUT_SECS, QUEUE_NAME};

// Re-export parser functions
pub use parser::{
    load_config, load_config_from_file, load_config_from_lookup, ENV_BROKER_URL,
    ENV_QUEUE_DURABLE, ENV_TIMEOUT,
};
