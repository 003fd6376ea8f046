//! Envelope publisher routed through the topic exchange.

use async_trait::async_trait;
use lapin::options::BasicPublishOptions;
use lapin::{BasicProperties, Channel, Connection};

use eventline_core::envelope::Envelope;
use eventline_core::error::EventError;
use eventline_core::publish::EventPublisher;

use crate::error::BrokerError;
use crate::topology;

/// Publishes envelopes to the topic exchange with the event name as the
/// routing key. Owns its own channel so ingestion never shares one with the
/// background consumer.
#[derive(Debug)]
pub struct TopicPublisher {
    channel: Channel,
}

impl TopicPublisher {
    /// Opens a dedicated publish channel on `conn`.
    ///
    /// # Errors
    ///
    /// Returns `BrokerError::Amqp` if the channel cannot be opened.
    pub async fn new(conn: &Connection) -> Result<Self, BrokerError> {
        let channel = conn.create_channel().await?;
        Ok(Self { channel })
    }

    async fn publish_wire(&self, envelope: &Envelope) -> Result<(), BrokerError> {
        let payload = envelope.to_wire()?;

        self.channel
            .basic_publish(
                topology::EXCHANGE,
                &envelope.name,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default().with_content_type("application/json".into()),
            )
            .await?;

        tracing::debug!(id = %envelope.id, routing_key = %envelope.name, "envelope published");
        Ok(())
    }
}

#[async_trait]
impl EventPublisher for TopicPublisher {
    async fn publish(&self, envelope: &Envelope) -> Result<(), EventError> {
        self.publish_wire(envelope).await.map_err(EventError::from)
    }
}
