//! Test stores — mock `EventStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use eventline_core::envelope::Envelope;
use eventline_core::error::EventError;
use eventline_core::store::{EventFilter, EventStore};
use uuid::Uuid;

/// An event store backed by a mutex-guarded map, mirroring the persistence
/// semantics of the real store: upsert-by-id, AND-combined filters with
/// inclusive `from` / exclusive `to`, newest-first ordering.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    rows: Mutex<HashMap<Uuid, Envelope>>,
}

impl InMemoryEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Whether the store holds no rows.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn upsert(&self, envelope: &Envelope) -> Result<Envelope, EventError> {
        self.rows
            .lock()
            .unwrap()
            .insert(envelope.id, envelope.clone());
        Ok(envelope.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Envelope, EventError> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(EventError::NotFound(id))
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Envelope>, EventError> {
        let rows = self.rows.lock().unwrap();
        let mut matched: Vec<Envelope> = rows
            .values()
            .filter(|e| filter.from.is_none_or(|from| e.timestamp >= from))
            .filter(|e| filter.to.is_none_or(|to| e.timestamp < to))
            .filter(|e| filter.name.as_ref().is_none_or(|name| &e.name == name))
            .filter(|e| {
                filter
                    .source
                    .as_ref()
                    .is_none_or(|source| &e.source == source)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(matched)
    }

    async fn distinct_names(&self) -> Result<Vec<String>, EventError> {
        let rows = self.rows.lock().unwrap();
        let mut names: Vec<String> = rows.values().map(|e| e.name.clone()).collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn distinct_sources(&self) -> Result<Vec<String>, EventError> {
        let rows = self.rows.lock().unwrap();
        let mut sources: Vec<String> = rows.values().map(|e| e.source.clone()).collect();
        sources.sort();
        sources.dedup();
        Ok(sources)
    }
}

/// An event store whose every operation fails with a storage error. Useful
/// for testing error-handling paths.
#[derive(Debug, Default)]
pub struct FailingEventStore;

#[async_trait]
impl EventStore for FailingEventStore {
    async fn upsert(&self, _envelope: &Envelope) -> Result<Envelope, EventError> {
        Err(EventError::Storage("connection refused".into()))
    }

    async fn get(&self, _id: Uuid) -> Result<Envelope, EventError> {
        Err(EventError::Storage("connection refused".into()))
    }

    async fn list(&self, _filter: &EventFilter) -> Result<Vec<Envelope>, EventError> {
        Err(EventError::Storage("connection refused".into()))
    }

    async fn distinct_names(&self) -> Result<Vec<String>, EventError> {
        Err(EventError::Storage("connection refused".into()))
    }

    async fn distinct_sources(&self) -> Result<Vec<String>, EventError> {
        Err(EventError::Storage("connection refused".into()))
    }
}
