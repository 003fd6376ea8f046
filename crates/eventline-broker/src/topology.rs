//! Broker topology: exchange, queue, and binding declarations.

use lapin::options::{ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{Connection, ExchangeKind};

use crate::error::BrokerError;

/// Name of the topic exchange all events are published to.
pub const EXCHANGE: &str = "events";

/// Name of the durable catch-all queue the consumer drains.
pub const LOG_QUEUE: &str = "log";

/// Binding pattern matching every routing key.
pub const MATCH_ALL: &str = "#";

/// Declares the durable topic exchange and the durable log queue, and binds
/// the queue with the match-all pattern. Declare semantics are idempotent,
/// so every publishing or consuming process calls this at startup; a
/// failure here is fatal to startup.
///
/// # Errors
///
/// Returns `BrokerError::Amqp` if any declaration or the binding fails.
pub async fn ensure_topology(conn: &Connection) -> Result<(), BrokerError> {
    let channel = conn.create_channel().await?;

    channel
        .exchange_declare(
            EXCHANGE,
            ExchangeKind::Topic,
            ExchangeDeclareOptions {
                durable: true,
                ..ExchangeDeclareOptions::default()
            },
            FieldTable::default(),
        )
        .await?;

    channel
        .queue_declare(
            LOG_QUEUE,
            QueueDeclareOptions {
                durable: true,
                ..QueueDeclareOptions::default()
            },
            FieldTable::default(),
        )
        .await?;

    channel
        .queue_bind(
            LOG_QUEUE,
            EXCHANGE,
            MATCH_ALL,
            QueueBindOptions::default(),
            FieldTable::default(),
        )
        .await?;

    tracing::info!(
        exchange = EXCHANGE,
        queue = LOG_QUEUE,
        pattern = MATCH_ALL,
        "broker topology ensured"
    );
    Ok(())
}
