//! Worker state definitions for the message processing cycle
//!
//! A worker moves through these states once per received message:
//!
//! ```text
//! Idle -> Received -> Fetching -> Extracting -> Publishing -> Ack -> Idle
//!            |            |                                   ^
//!            +------------+-----------------------------------+
//! ```
//!
//! The `Received -> Ack` edge is the already-seen skip path (and the path for
//! unusable message bodies). The `Fetching -> Ack` edge is a failed fetch,
//! which counts as a page with zero links. A receive timeout keeps the worker
//! in `Idle`.
use std::fmt;

/// Represents where a crawl worker is in its processing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkerState {
    /// Waiting on the queue for the next message
    #[default]
    Idle,

    /// Holding a message that has not been acknowledged yet
    Received,

    /// Fetching the page named by the message
    Fetching,

    /// Extracting same-domain links from the fetched page
    Extracting,

    /// Publishing unseen links back onto the queue
    Publishing,

    /// Acknowledging the message to the broker
    Ack,
}

impl WorkerState {
    /// Returns true if the state machine allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: WorkerState) -> bool {
        use WorkerState::*;

        matches!(
            (self, next),
            (Idle, Idle)
                | (Idle, Received)
                | (Received, Fetching)
                | (Received, Ack)
                | (Fetching, Extracting)
                | (Fetching, Ack)
                | (Extracting, Publishing)
                | (Publishing, Ack)
                | (Ack, Idle)
        )
    }

    /// Returns true while the worker holds an unacknowledged message
    ///
    /// A crash in any of these states leaves the message with the broker,
    /// which redelivers it.
    pub fn holds_message(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Received => "received",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Publishing => "publishing",
            Self::Ack => "ack",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
