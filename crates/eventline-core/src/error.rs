//! Error taxonomy shared across the pipeline.

use thiserror::Error;
use uuid::Uuid;

use crate::validate::FieldError;

/// Top-level error type for pipeline operations.
#[derive(Debug, Error)]
pub enum EventError {
    /// Lookup by id found no matching event. An expected outcome, distinct
    /// from a storage failure.
    #[error("no event with id \"{0}\" exists")]
    NotFound(Uuid),

    /// The inbound payload failed validation. Carries every violation, not
    /// just the first.
    #[error("validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// A database failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// A broker or serialization failure.
    #[error("transport error: {0}")]
    Transport(String),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
