//! Queue traits and error types
//!
//! This module defines the trait interface for frontier queue backends and
//! the message type they hand to workers.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during queue operations
///
/// Every variant is a broker-level failure. A receive timeout is not an
/// error and is reported as `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("AMQP error: {0}")]
    Amqp(#[from] lapin::Error),

    #[error("Broker rejected publish of {url}")]
    PublishNacked { url: String },

    #[error("Consumer on queue '{0}' was cancelled")]
    ConsumerClosed(String),

    #[error("Unknown delivery tag: {0}")]
    UnknownDeliveryTag(u64),
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// A message received from the frontier queue
///
/// The worker holds custody of the message until it is acknowledged. If the
/// process dies first, the broker delivers it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierMessage {
    /// Raw message body, expected to be one UTF-8 URL
    pub body: Vec<u8>,

    /// Broker-assigned handle used to acknowledge this delivery
    pub delivery_tag: u64,

    /// True when the broker has delivered this message before
    pub redelivered: bool,
}

impl FrontierMessage {
    /// Returns the body as text, or None if it is not valid UTF-8
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Trait for frontier queue implementations
///
/// Publish and receive always target the one queue the implementation was
/// opened on. Implementations must give at-least-once delivery: a message
/// that is received but never acknowledged is eventually delivered again.
#[async_trait]
pub trait FrontierQueue: Send {
    /// Name of the queue this handle publishes to and consumes from
    fn queue_name(&self) -> &str;

    /// Enqueues one URL as a UTF-8 text body
    ///
    /// Returns once the broker has accepted the message.
    async fn publish(&mut self, url: &str) -> QueueResult<()>;

    /// Waits up to `timeout` for the next message
    ///
    /// # Returns
    ///
    /// * `Ok(Some(message))` - A message is now in the caller's custody
    /// * `Ok(None)` - Nothing arrived before the timeout
    /// * `Err(QueueError)` - The broker connection or consumer failed
    async fn receive(&mut self, timeout: Duration) -> QueueResult<Option<FrontierMessage>>;

    /// Confirms that a message has been fully processed
    ///
    /// Must only be called after every side effect of processing the message
    /// has succeeded.
    async fn ack(&mut self, message: &FrontierMessage) -> QueueResult<()>;
}
