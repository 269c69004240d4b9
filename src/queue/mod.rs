//! Queue module for the crawl frontier
//!
//! This module holds the frontier queue abstraction and its backends:
//! - `AmqpQueue`: RabbitMQ via AMQP 0-9-1, used by the producer and worker binaries
//! - `MemoryQueue`: in-process queue with the same ack/redelivery contract
//!
//! Queue bodies are bare UTF-8 URLs with no envelope.

mod amqp;
mod memory;
mod traits;

pub use amqp::AmqpQueue;
pub use memory::MemoryQueue;
pub use traits::{FrontierMessage, FrontierQueue, QueueError, QueueResult};
