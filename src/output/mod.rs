//! Output module for worker progress reporting
//!
//! This module handles:
//! - Counting what a worker did with each message
//! - Rendering those counters as periodic progress lines and a final summary

pub mod stats;

pub use stats::{log_statistics, WorkerStats};
