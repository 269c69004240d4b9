//! AMQP (RabbitMQ) frontier queue
//!
//! Messages go through the default exchange with the queue name as routing
//! key. Publisher confirms are enabled so `publish` only returns after the
//! broker has taken responsibility for the message.

use crate::config::BrokerConfig;
use crate::queue::traits::{FrontierMessage, FrontierQueue, QueueError, QueueResult};
use async_trait::async_trait;
use futures::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, BasicQosOptions,
    ConfirmSelectOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, Consumer};
use std::time::Duration;

/// Consumer tag prefix; the process id is appended so brokers can tell
/// competing workers apart in their management UI
const CONSUMER_TAG_PREFIX: &str = "frontier-worker";

/// A frontier queue backed by a RabbitMQ broker
pub struct AmqpQueue {
    connection: Connection,
    channel: Channel,
    consumer: Option<Consumer>,
    queue_name: String,
    delivery_mode: u8,
}

impl AmqpQueue {
    /// Connects to the broker and declares the frontier queue
    ///
    /// The queue is declared with the durability from `config`, and every
    /// message later published through this handle uses the matching
    /// delivery mode.
    ///
    /// # Arguments
    ///
    /// * `config` - The broker configuration
    ///
    /// # Returns
    ///
    /// * `Ok(AmqpQueue)` - Connected, with the queue declared
    /// * `Err(QueueError)` - Connection, channel or declaration failed
    pub async fn connect(config: &BrokerConfig) -> QueueResult<Self> {
        let connection = Connection::connect(&config.url, ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;

        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await?;

        // One unacknowledged message per worker so competing consumers share
        // the frontier instead of one of them buffering it.
        channel.basic_qos(1, BasicQosOptions::default()).await?;

        let queue = channel
            .queue_declare(
                &config.queue_name,
                QueueDeclareOptions {
                    durable: config.durable,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;

        tracing::info!(
            "Connected to broker, queue '{}' declared (durable: {}, {} messages ready)",
            config.queue_name,
            config.durable,
            queue.message_count()
        );

        Ok(Self {
            connection,
            channel,
            consumer: None,
            queue_name: config.queue_name.clone(),
            delivery_mode: config.delivery_mode(),
        })
    }

    /// Closes the channel and connection cleanly
    ///
    /// Any message still unacknowledged at this point is returned to the
    /// queue by the broker.
    pub async fn close(self) -> QueueResult<()> {
        self.channel.close(200, "OK").await?;
        self.connection.close(200, "OK").await?;
        tracing::debug!("Closed broker connection");
        Ok(())
    }

    /// Starts consuming on first use; producers never open a consumer
    async fn consumer(&mut self) -> QueueResult<&mut Consumer> {
        if self.consumer.is_none() {
            let tag = format!("{}-{}", CONSUMER_TAG_PREFIX, std::process::id());
            let consumer = self
                .channel
                .basic_consume(
                    &self.queue_name,
                    &tag,
                    BasicConsumeOptions::default(),
                    FieldTable::default(),
                )
                .await?;
            tracing::debug!("Started consumer '{}' on queue '{}'", tag, self.queue_name);
            self.consumer = Some(consumer);
        }

        self.consumer
            .as_mut()
            .ok_or_else(|| QueueError::ConsumerClosed(self.queue_name.clone()))
    }
}

#[async_trait]
impl FrontierQueue for AmqpQueue {
    fn queue_name(&self) -> &str {
        &self.queue_name
    }

    async fn publish(&mut self, url: &str) -> QueueResult<()> {
        let properties = BasicProperties::default()
            .with_delivery_mode(self.delivery_mode)
            .with_content_type("text/plain".into());

        let confirmation = self
            .channel
            .basic_publish(
                "",
                &self.queue_name,
                BasicPublishOptions::default(),
                url.as_bytes(),
                properties,
            )
            .await?
            .await?;

        if confirmation.is_nack() {
            return Err(QueueError::PublishNacked {
                url: url.to_string(),
            });
        }

        Ok(())
    }

    async fn receive(&mut self, timeout: Duration) -> QueueResult<Option<FrontierMessage>> {
        let queue_name = self.queue_name.clone();
        let consumer = self.consumer().await?;

        match tokio::time::timeout(timeout, consumer.next()).await {
            Err(_elapsed) => Ok(None),
            Ok(None) => Err(QueueError::ConsumerClosed(queue_name)),
            Ok(Some(Err(e))) => Err(e.into()),
            Ok(Some(Ok(delivery))) => Ok(Some(FrontierMessage {
                body: delivery.data,
                delivery_tag: delivery.delivery_tag,
                redelivered: delivery.redelivered,
            })),
        }
    }

    async fn ack(&mut self, message: &FrontierMessage) -> QueueResult<()> {
        self.channel
            .basic_ack(message.delivery_tag, BasicAckOptions::default())
            .await?;
        Ok(())
    }
}
