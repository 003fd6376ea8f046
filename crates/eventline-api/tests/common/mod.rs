//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use eventline_core::publish::EventPublisher;
use eventline_core::store::EventStore;
use eventline_test_support::{FixedClock, InMemoryEventStore, RecordingPublisher};

use eventline_api::routes;
use eventline_api::state::AppState;

/// Fixed timestamp used across all integration tests.
pub fn fixed_now() -> chrono::DateTime<chrono::Utc> {
    chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap()
}

/// Build the full app router over the given store and publisher with a
/// deterministic clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(store: Arc<dyn EventStore>, publisher: Arc<dyn EventPublisher>) -> Router {
    let app_state = AppState::new(store, publisher, Arc::new(FixedClock(fixed_now())));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/events", routes::events::router())
        .with_state(app_state)
}

/// Build the app over fresh in-memory mocks, returning handles to both.
pub fn build_default_app() -> (Router, Arc<InMemoryEventStore>, Arc<RecordingPublisher>) {
    let store = Arc::new(InMemoryEventStore::new());
    let publisher = Arc::new(RecordingPublisher::new());
    let app = build_test_app(store.clone(), publisher.clone());
    (app, store, publisher)
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
