//! `PostgreSQL` implementation of the `EventStore` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use eventline_core::envelope::Envelope;
use eventline_core::error::EventError;
use eventline_core::store::{EventFilter, EventStore};

use crate::schema;

/// PostgreSQL-backed event store.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    timestamp: DateTime<Utc>,
    name: String,
    source: String,
    body: Option<serde_json::Value>,
}

impl From<EventRow> for Envelope {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            timestamp: row.timestamp,
            name: row.name,
            source: row.source,
            body: row.body,
        }
    }
}

impl PgEventStore {
    /// Creates a new `PgEventStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the events table and its timestamp index if absent.
    /// Idempotent; every process that writes to the log calls this at
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Storage` if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), EventError> {
        sqlx::raw_sql(schema::CREATE_EVENTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("ensure_schema", &e))?;
        Ok(())
    }
}

fn storage_error(operation: &str, err: &sqlx::Error) -> EventError {
    tracing::error!(operation, error = %err, "event store query failed");
    EventError::Storage(err.to_string())
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn upsert(&self, envelope: &Envelope) -> Result<Envelope, EventError> {
        sqlx::query(
            "INSERT INTO events (id, timestamp, name, source, body)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                 timestamp = EXCLUDED.timestamp,
                 name      = EXCLUDED.name,
                 source    = EXCLUDED.source,
                 body      = EXCLUDED.body",
        )
        .bind(envelope.id)
        .bind(envelope.timestamp)
        .bind(&envelope.name)
        .bind(&envelope.source)
        .bind(&envelope.body)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("upsert", &e))?;

        Ok(envelope.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Envelope, EventError> {
        let row: Option<EventRow> =
            sqlx::query_as("SELECT id, timestamp, name, source, body FROM events WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage_error("get", &e))?;

        row.map(Envelope::from).ok_or(EventError::NotFound(id))
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Envelope>, EventError> {
        let mut query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT id, timestamp, name, source, body FROM events WHERE TRUE");

        if let Some(from) = filter.from {
            query.push(" AND timestamp >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            query.push(" AND timestamp < ").push_bind(to);
        }
        if let Some(name) = &filter.name {
            query.push(" AND name = ").push_bind(name);
        }
        if let Some(source) = &filter.source {
            query.push(" AND source = ").push_bind(source);
        }
        query.push(" ORDER BY timestamp DESC");

        let rows: Vec<EventRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list", &e))?;

        Ok(rows.into_iter().map(Envelope::from).collect())
    }

    async fn distinct_names(&self) -> Result<Vec<String>, EventError> {
        sqlx::query_scalar("SELECT DISTINCT name FROM events")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("distinct_names", &e))
    }

    async fn distinct_sources(&self) -> Result<Vec<String>, EventError> {
        sqlx::query_scalar("SELECT DISTINCT source FROM events")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("distinct_sources", &e))
    }
}
