//! Event store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::envelope::Envelope;
use crate::error::EventError;

/// Filter criteria for listing events. Absent fields impose no constraint;
/// supplied fields are AND-combined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Lower bound on `timestamp`, inclusive.
    pub from: Option<DateTime<Utc>>,
    /// Upper bound on `timestamp`, exclusive.
    pub to: Option<DateTime<Utc>>,
    /// Exact match on `name`.
    pub name: Option<String>,
    /// Exact match on `source`.
    pub source: Option<String>,
}

/// Persistence seam for the event log.
///
/// `upsert` is the mechanism that makes at-least-once delivery safe: a
/// redelivered envelope overwrites its own row instead of erroring.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Inserts the envelope, or fully overwrites the row on id conflict.
    async fn upsert(&self, envelope: &Envelope) -> Result<Envelope, EventError>;

    /// Exact lookup by id. Returns `EventError::NotFound` when absent.
    async fn get(&self, id: Uuid) -> Result<Envelope, EventError>;

    /// Lists events matching `filter`, ordered by timestamp descending.
    /// Returns an empty vec, not an error, when nothing matches.
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Envelope>, EventError>;

    /// Distinct event names present in the log, for filter UIs.
    async fn distinct_names(&self) -> Result<Vec<String>, EventError>;

    /// Distinct event sources present in the log, for filter UIs.
    async fn distinct_sources(&self) -> Result<Vec<String>, EventError>;
}
