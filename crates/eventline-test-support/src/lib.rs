//! Shared test mocks and utilities for the Eventline pipeline.

mod clock;
mod publisher;
mod store;

pub use clock::FixedClock;
pub use publisher::{FailingPublisher, RecordingPublisher};
pub use store::{FailingEventStore, InMemoryEventStore};
