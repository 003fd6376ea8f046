//! Routes for ingesting and querying events.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use eventline_core::envelope::Envelope;
use eventline_core::error::EventError;
use eventline_core::store::EventFilter;
use eventline_core::validate::{FieldError, validate};

use crate::error::ApiError;
use crate::state::AppState;

/// Returns the router for the events surface, mounted under `/api/events`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", put(put_event).get(list_events))
        .route("/names", get(list_names))
        .route("/sources", get(list_sources))
        .route("/{id}", get(get_event))
}

/// PUT /api/events
///
/// Validates the inbound payload, assigns an id, and routes the canonical
/// envelope onto the broker. A publish failure is logged and the envelope
/// is still returned: a 200 means the event was accepted and assigned an
/// id, not that it was durably queued.
async fn put_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Envelope>, ApiError> {
    let raw: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::validation("body", "failed to parse json"))?;

    let envelope = validate(&raw, state.clock.as_ref()).map_err(EventError::Validation)?;

    if let Err(err) = state.publisher.publish(&envelope).await {
        tracing::error!(
            id = %envelope.id,
            name = %envelope.name,
            error = %err,
            "failed to enqueue accepted envelope"
        );
    }

    Ok(Json(envelope))
}

/// Query parameters for GET /api/events.
#[derive(Debug, Deserialize)]
struct ListParams {
    from: Option<String>,
    to: Option<String>,
    name: Option<String>,
    source: Option<String>,
}

/// Parses an optional RFC3339 bound, pushing an error on failure.
fn parse_bound(
    raw: Option<&str>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                format!("{field} must be an RFC-3339 compliant string"),
            ));
            None
        }
    }
}

/// GET /api/events?from=&to=&name=&source=
async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Envelope>>, ApiError> {
    let mut errors = Vec::new();
    let from = parse_bound(params.from.as_deref(), "from", &mut errors);
    let to = parse_bound(params.to.as_deref(), "to", &mut errors);

    if !errors.is_empty() {
        return Err(EventError::Validation(errors).into());
    }

    let filter = EventFilter {
        from,
        to,
        name: params.name,
        source: params.source,
    };

    let events = state.store.list(&filter).await?;
    Ok(Json(events))
}

/// GET /api/events/names
async fn list_names(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let names = state.store.distinct_names().await?;
    Ok(Json(names))
}

/// GET /api/events/sources
async fn list_sources(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let sources = state.store.distinct_sources().await?;
    Ok(Json(sources))
}

/// GET /api/events/{id}
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::validation("id", "id must be a valid UUID string"))?;

    let event = state.store.get(id).await?;
    Ok(Json(event))
}
