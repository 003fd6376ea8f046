//! Broker error types.

use eventline_core::error::EventError;
use thiserror::Error;

/// Errors raised by the broker layer.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Transport failure talking to the broker.
    #[error("amqp error: {0}")]
    Amqp(#[from] lapin::Error),

    /// Wire-format failure encoding or decoding an envelope.
    #[error("wire codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl From<BrokerError> for EventError {
    fn from(err: BrokerError) -> Self {
        Self::Transport(err.to_string())
    }
}
