//! Test publishers — mock `EventPublisher` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use eventline_core::envelope::Envelope;
use eventline_core::error::EventError;
use eventline_core::publish::EventPublisher;

/// A publisher that records every envelope it is asked to publish.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<Envelope>>,
}

impl RecordingPublisher {
    /// Creates an empty recording publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything published so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn published(&self) -> Vec<Envelope> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, envelope: &Envelope) -> Result<(), EventError> {
        self.published.lock().unwrap().push(envelope.clone());
        Ok(())
    }
}

/// A publisher that always fails with a transport error. Useful for testing
/// the ingest path's lenient publish-failure policy.
#[derive(Debug, Default)]
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _envelope: &Envelope) -> Result<(), EventError> {
        Err(EventError::Transport("broker unreachable".into()))
    }
}
