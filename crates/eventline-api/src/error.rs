//! Eventline API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eventline_core::error::EventError;
use eventline_core::validate::FieldError;
use serde::Serialize;

/// JSON body returned for error responses: the complete list of failures,
/// never truncated to the first.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error messages.
    pub errors: Vec<String>,
}

/// HTTP-layer wrapper around `EventError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub EventError);

impl ApiError {
    /// Convenience constructor for a single request-parameter violation.
    #[must_use]
    pub fn validation(field: &'static str, message: &str) -> Self {
        Self(EventError::Validation(vec![FieldError::new(
            field, message,
        )]))
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self.0 {
            EventError::Validation(field_errors) => (
                StatusCode::BAD_REQUEST,
                field_errors.into_iter().map(|e| e.message).collect(),
            ),
            err @ EventError::NotFound(_) => (StatusCode::NOT_FOUND, vec![err.to_string()]),
            err @ EventError::Storage(_) => {
                tracing::error!(error = %err, "request failed on storage");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec!["database error".to_string()],
                )
            }
            err @ EventError::Transport(_) => {
                tracing::error!(error = %err, "request failed on transport");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec!["internal error".to_string()],
                )
            }
        };

        (status, Json(ErrorBody { errors })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_of(err: EventError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = EventError::Validation(vec![FieldError::new("name", "name is required")]);
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of(EventError::NotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_storage_maps_to_500_without_leaking_detail() {
        let response = ApiError(EventError::Storage("password=hunter2".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_transport_maps_to_500() {
        assert_eq!(
            status_of(EventError::Transport("broker unreachable".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
