//! In-process frontier queue
//!
//! Mirrors the broker's delivery contract closely enough to exercise the
//! worker without RabbitMQ: FIFO delivery, per-message acknowledgment, and
//! redelivery of unacknowledged messages through [`MemoryQueue::recover`].
//! Clones share the same underlying queue, so a producer, several workers and
//! a test can all hold a handle.

use crate::config::QUEUE_NAME;
use crate::queue::traits::{FrontierMessage, FrontierQueue, QueueError, QueueResult};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

#[derive(Debug)]
struct Pending {
    body: Vec<u8>,
    redelivered: bool,
}

#[derive(Debug, Default)]
struct Inner {
    ready: VecDeque<Pending>,
    unacked: HashMap<u64, Vec<u8>>,
    next_tag: u64,
    published: Vec<String>,
    acked: u64,
}

/// A shared, in-memory frontier queue
#[derive(Debug, Clone)]
pub struct MemoryQueue {
    name: String,
    inner: Arc<Mutex<Inner>>,
    notify: Arc<Notify>,
}

impl Default for MemoryQueue {
    fn default() -> Self {
        Self::new(QUEUE_NAME)
    }
}

impl MemoryQueue {
    /// Creates an empty queue with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inner: Arc::new(Mutex::new(Inner::default())),
            notify: Arc::new(Notify::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns every body ever published, in publish order
    pub fn published(&self) -> Vec<String> {
        self.lock().published.clone()
    }

    /// Number of messages waiting to be delivered
    pub fn ready_len(&self) -> usize {
        self.lock().ready.len()
    }

    /// Number of delivered messages not yet acknowledged
    pub fn unacked_len(&self) -> usize {
        self.lock().unacked.len()
    }

    /// Number of acknowledged messages
    pub fn acked_count(&self) -> u64 {
        self.lock().acked
    }

    /// Returns all unacknowledged messages to the front of the queue
    ///
    /// This is what a broker does when a consumer's connection drops. The
    /// returned messages are flagged as redelivered and keep their original
    /// relative order.
    ///
    /// # Returns
    ///
    /// The number of messages requeued
    pub fn recover(&self) -> usize {
        let mut inner = self.lock();
        let mut tags: Vec<u64> = inner.unacked.keys().copied().collect();
        tags.sort_unstable();

        let count = tags.len();
        for tag in tags.into_iter().rev() {
            if let Some(body) = inner.unacked.remove(&tag) {
                inner.ready.push_front(Pending {
                    body,
                    redelivered: true,
                });
            }
        }
        drop(inner);

        for _ in 0..count {
            self.notify.notify_one();
        }
        count
    }

    fn try_take(&self) -> Option<FrontierMessage> {
        let mut inner = self.lock();
        let pending = inner.ready.pop_front()?;

        inner.next_tag += 1;
        let delivery_tag = inner.next_tag;
        inner.unacked.insert(delivery_tag, pending.body.clone());

        Some(FrontierMessage {
            body: pending.body,
            delivery_tag,
            redelivered: pending.redelivered,
        })
    }
}

#[async_trait]
impl FrontierQueue for MemoryQueue {
    fn queue_name(&self) -> &str {
        &self.name
    }

    async fn publish(&mut self, url: &str) -> QueueResult<()> {
        {
            let mut inner = self.lock();
            inner.ready.push_back(Pending {
                body: url.as_bytes().to_vec(),
                redelivered: false,
            });
            inner.published.push(url.to_string());
        }
        self.notify.notify_one();
        Ok(())
    }

    async fn receive(&mut self, timeout: Duration) -> QueueResult<Option<FrontierMessage>> {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(message) = self.try_take() {
                return Ok(Some(message));
            }

            if tokio::time::timeout_at(deadline, self.notify.notified())
                .await
                .is_err()
            {
                return Ok(self.try_take());
            }
        }
    }

    async fn ack(&mut self, message: &FrontierMessage) -> QueueResult<()> {
        let mut inner = self.lock();
        if inner.unacked.remove(&message.delivery_tag).is_none() {
            return Err(QueueError::UnknownDeliveryTag(message.delivery_tag));
        }
        inner.acked += 1;
        Ok(())
    }
}
