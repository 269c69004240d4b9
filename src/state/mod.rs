//! State module for tracking the crawl worker's progress through a message
//!
//! # Components
//!
//! - `WorkerState`: Where a worker is in its receive/fetch/extract/publish/ack cycle

mod worker_state;

// Re-export main types
pub use worker_state::WorkerState;
