//! Eventline consumer entry point.
//!
//! Long-lived process that drains the durable log queue and upserts every
//! delivered envelope into the event store. Runs for the process lifetime;
//! exits when the broker connection closes the delivery stream.

use std::error::Error;

use lapin::{Connection, ConnectionProperties};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use eventline_broker::{AckPolicy, consumer, topology};
use eventline_core::store::EventStore;
use eventline_store::PgEventStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Eventline consumer");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL environment variable must be set")?;
    let amqp_url =
        std::env::var("AMQP_URL").map_err(|_| "AMQP_URL environment variable must be set")?;
    let policy = match std::env::var("ACK_POLICY") {
        Ok(raw) => raw.parse::<AckPolicy>()?,
        Err(_) => AckPolicy::default(),
    };

    // Create database connection pool and ensure the event log exists.
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    let store = PgEventStore::new(pool);
    store.ensure_schema().await?;

    // Connect to the broker and ensure topology before consuming.
    let conn = Connection::connect(&amqp_url, ConnectionProperties::default()).await?;
    topology::ensure_topology(&conn).await?;

    // One channel dedicated to the consume role.
    let channel = conn.create_channel().await?;

    consumer::consume(&channel, policy, |envelope| {
        let store = store.clone();
        async move {
            tracing::info!(
                id = %envelope.id,
                name = %envelope.name,
                source = %envelope.source,
                "received event"
            );
            match store.upsert(&envelope).await {
                Ok(_) => true,
                Err(err) => {
                    tracing::error!(id = %envelope.id, error = %err, "failed to persist event");
                    false
                }
            }
        }
    })
    .await?;

    tracing::info!("bye!");
    Ok(())
}
