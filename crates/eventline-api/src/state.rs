//! Shared application state.

use std::sync::Arc;

use eventline_core::clock::Clock;
use eventline_core::publish::EventPublisher;
use eventline_core::store::EventStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persistence seam for the query endpoints.
    pub store: Arc<dyn EventStore>,
    /// Broker seam for the ingest endpoint.
    pub publisher: Arc<dyn EventPublisher>,
    /// Time source for default timestamps.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        store: Arc<dyn EventStore>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            publisher,
            clock,
        }
    }
}
