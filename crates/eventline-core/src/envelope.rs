//! The canonical event envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical event record moved through the whole pipeline: HTTP ingest,
/// broker payload, and persisted row all share this shape.
///
/// `body` is an opaque JSON value. `None` means the producer supplied no
/// body at all, which is distinct from an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Unique event identifier, assigned at validation time.
    pub id: Uuid,
    /// When the event occurred; defaults to ingest time.
    pub timestamp: DateTime<Utc>,
    /// Event type tag; doubles as the broker routing key.
    pub name: String,
    /// Producer identifier.
    pub source: String,
    /// Opaque JSON payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl Envelope {
    /// Serializes the envelope to its wire JSON form (broker payload).
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the body contains a value JSON
    /// cannot represent (e.g. a non-finite float).
    pub fn to_wire(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserializes an envelope from its wire JSON form.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error if the bytes are not a valid
    /// envelope document.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
