//! Envelope validation and normalization.
//!
//! Turns arbitrary inbound JSON into a canonical [`Envelope`] or a complete
//! list of field errors. Rules are applied independently so every violation
//! is reported together, never just the first one.

use serde_json::Value;
use uuid::Uuid;

use crate::clock::Clock;
use crate::envelope::Envelope;

/// A single validation failure, tied to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending input field.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Replaces interior whitespace runs with a single hyphen and trims the
/// ends: `"article  published"` becomes `"article-published"`.
#[must_use]
pub fn normalize_tag(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Validates raw inbound JSON and builds the canonical envelope.
///
/// On success a fresh id is assigned and `timestamp` is filled from `clock`
/// when absent from the input. On failure no id is assigned and the
/// complete list of violations is returned.
///
/// # Errors
///
/// Returns every field error found in the input.
pub fn validate(raw: &Value, clock: &dyn Clock) -> Result<Envelope, Vec<FieldError>> {
    let Some(object) = raw.as_object() else {
        return Err(vec![FieldError::new(
            "body",
            "request body must be a JSON object",
        )]);
    };

    let mut errors = Vec::new();

    let timestamp = match object.get("timestamp") {
        None => Some(clock.now()),
        Some(Value::String(s)) => match chrono::DateTime::parse_from_rfc3339(s) {
            Ok(parsed) => Some(parsed.with_timezone(&chrono::Utc)),
            Err(_) => {
                errors.push(FieldError::new(
                    "timestamp",
                    "timestamp must be an RFC-3339 compliant string",
                ));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new("timestamp", "timestamp must be a string"));
            None
        }
    };

    let name = validate_tag(object, "name", &mut errors);
    let source = validate_tag(object, "source", &mut errors);

    let body = match object.get("body") {
        // Absent body is distinct from an explicit null.
        None => None,
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.push(FieldError::new("body", "body must be valid JSON"));
                None
            }
        },
        Some(value) => Some(value.clone()),
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Envelope {
        id: Uuid::new_v4(),
        // Both are only None when an error was recorded above.
        timestamp: timestamp.unwrap_or_else(|| clock.now()),
        name: name.unwrap_or_default(),
        source: source.unwrap_or_default(),
        body,
    })
}

/// Validates a required tag field (`name` or `source`) and normalizes it.
fn validate_tag(
    object: &serde_json::Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field) {
        None => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
        Some(Value::String(s)) => {
            let normalized = normalize_tag(s);
            if normalized.is_empty() {
                errors.push(FieldError::new(field, format!("{field} must not be empty")));
                None
            } else {
                Some(normalized)
            }
        }
        Some(_) => {
            errors.push(FieldError::new(field, format!("{field} must be a string")));
            None
        }
    }
}
