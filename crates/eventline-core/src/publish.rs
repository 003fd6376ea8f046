//! Publisher abstraction.

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::EventError;

/// Seam for routing a validated envelope onto the broker.
///
/// Fire-and-forget from the caller's perspective, but transport and
/// serialization failures surface synchronously. No built-in retry: the
/// caller decides whether a failed publish is fatal to its request.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes the envelope, routed by its `name`.
    async fn publish(&self, envelope: &Envelope) -> Result<(), EventError>;
}
