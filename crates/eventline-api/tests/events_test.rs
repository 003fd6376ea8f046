//! Integration tests for the events ingest and query surface.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::TimeZone;
use uuid::Uuid;

use eventline_core::envelope::Envelope;
use eventline_core::store::EventStore;
use eventline_test_support::{FailingEventStore, FailingPublisher, InMemoryEventStore};

fn make_envelope(name: &str, source: &str, hour: u32) -> Envelope {
    Envelope {
        id: Uuid::new_v4(),
        timestamp: chrono::Utc.with_ymd_and_hms(2026, 1, 15, hour, 0, 0).unwrap(),
        name: name.to_string(),
        source: source.to_string(),
        body: None,
    }
}

// --- PUT /api/events ---

#[tokio::test]
async fn test_put_event_normalizes_and_assigns_id() {
    let (app, _store, publisher) = common::build_default_app();

    let (status, json) = common::put_json(
        app,
        "/api/events",
        &serde_json::json!({
            "name": "article published",
            "source": "site A",
            "body": {"title": "x"},
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "article-published");
    assert_eq!(json["source"], "site-A");
    assert_eq!(json["body"], serde_json::json!({"title": "x"}));
    assert!(Uuid::parse_str(json["id"].as_str().unwrap()).is_ok());

    let timestamp = chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap())
        .unwrap()
        .with_timezone(&chrono::Utc);
    assert_eq!(timestamp, common::fixed_now());

    // The accepted envelope was routed onto the broker seam.
    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id.to_string(), json["id"].as_str().unwrap());
    assert_eq!(published[0].name, "article-published");
}

#[tokio::test]
async fn test_put_event_with_supplied_timestamp_keeps_it() {
    let (app, _store, _publisher) = common::build_default_app();

    let (status, json) = common::put_json(
        app,
        "/api/events",
        &serde_json::json!({
            "timestamp": "2025-06-01T12:30:00Z",
            "name": "tweet",
            "source": "firehose",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["timestamp"], "2025-06-01T12:30:00Z");
}

#[tokio::test]
async fn test_put_event_with_non_json_string_body_is_rejected() {
    let (app, _store, publisher) = common::build_default_app();

    let (status, json) = common::put_json(
        app,
        "/api/events",
        &serde_json::json!({
            "name": "tweet",
            "source": "firehose",
            "body": "{not json",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = json["errors"].as_array().unwrap();
    assert!(
        errors
            .iter()
            .any(|e| e.as_str().unwrap().contains("valid JSON"))
    );
    // No side effect on a rejected request.
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn test_put_event_reports_every_missing_field() {
    let (app, _store, publisher) = common::build_default_app();

    let (status, json) = common::put_json(app, "/api/events", &serde_json::json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&serde_json::json!("name is required")));
    assert!(errors.contains(&serde_json::json!("source is required")));
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn test_put_event_with_unparseable_body_is_a_400() {
    let (app, _store, _publisher) = common::build_default_app();

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri("/api/events")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_event_still_succeeds_when_publish_fails() {
    let store = Arc::new(InMemoryEventStore::new());
    let app = common::build_test_app(store, Arc::new(FailingPublisher));

    let (status, json) = common::put_json(
        app,
        "/api/events",
        &serde_json::json!({"name": "tweet", "source": "firehose"}),
    )
    .await;

    // Lenient policy: the caller still gets the accepted envelope; the
    // failure is only logged. A 200 does not imply durable queuing.
    assert_eq!(status, StatusCode::OK);
    assert!(Uuid::parse_str(json["id"].as_str().unwrap()).is_ok());
}

// --- GET /api/events ---

#[tokio::test]
async fn test_list_returns_newest_first_regardless_of_insert_order() {
    let (app, store, _publisher) = common::build_default_app();
    let t1 = make_envelope("tweet", "firehose", 7);
    let t2 = make_envelope("tweet", "firehose", 8);
    let t3 = make_envelope("tweet", "firehose", 9);
    for e in [&t2, &t3, &t1] {
        store.upsert(e).await.unwrap();
    }

    let (status, json) = common::get_json(app, "/api/events").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![t3.id.to_string(), t2.id.to_string(), t1.id.to_string()]
    );
}

#[tokio::test]
async fn test_list_from_bound_is_inclusive() {
    let (app, store, _publisher) = common::build_default_app();
    let t1 = make_envelope("tweet", "firehose", 7);
    let t2 = make_envelope("tweet", "firehose", 8);
    let t3 = make_envelope("tweet", "firehose", 9);
    for e in [&t1, &t2, &t3] {
        store.upsert(e).await.unwrap();
    }

    let (status, json) =
        common::get_json(app, "/api/events?from=2026-01-15T08:00:00Z").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![t3.id.to_string(), t2.id.to_string()]);
}

#[tokio::test]
async fn test_list_combines_filters_with_and() {
    let (app, store, _publisher) = common::build_default_app();
    let matching = make_envelope("tweet", "firehose", 8);
    store.upsert(&matching).await.unwrap();
    store
        .upsert(&make_envelope("tweet", "scraper", 8))
        .await
        .unwrap();
    store
        .upsert(&make_envelope("dividend", "firehose", 8))
        .await
        .unwrap();

    let (status, json) =
        common::get_json(app, "/api/events?name=tweet&source=firehose").await;

    assert_eq!(status, StatusCode::OK);
    let listed = json.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], matching.id.to_string());
}

#[tokio::test]
async fn test_list_with_no_matches_returns_empty_array() {
    let (app, _store, _publisher) = common::build_default_app();

    let (status, json) = common::get_json(app, "/api/events?name=no-such-name").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_rejects_malformed_bounds_listing_each() {
    let (app, _store, _publisher) = common::build_default_app();

    let (status, json) =
        common::get_json(app, "/api/events?from=yesterday&to=tomorrow").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&serde_json::json!(
        "from must be an RFC-3339 compliant string"
    )));
    assert!(errors.contains(&serde_json::json!(
        "to must be an RFC-3339 compliant string"
    )));
}

#[tokio::test]
async fn test_list_surfaces_storage_failure_as_generic_500() {
    let app = common::build_test_app(
        Arc::new(FailingEventStore),
        Arc::new(eventline_test_support::RecordingPublisher::new()),
    );

    let (status, json) = common::get_json(app, "/api/events").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["errors"], serde_json::json!(["database error"]));
}

// --- GET /api/events/names and /sources ---

#[tokio::test]
async fn test_distinct_names_and_sources() {
    let (app, store, _publisher) = common::build_default_app();
    store
        .upsert(&make_envelope("tweet", "firehose", 7))
        .await
        .unwrap();
    store
        .upsert(&make_envelope("tweet", "firehose", 8))
        .await
        .unwrap();
    store
        .upsert(&make_envelope("dividend", "nasdaq", 9))
        .await
        .unwrap();

    let (status, names) = common::get_json(app.clone(), "/api/events/names").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names, serde_json::json!(["dividend", "tweet"]));

    let (status, sources) = common::get_json(app, "/api/events/sources").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sources, serde_json::json!(["firehose", "nasdaq"]));
}

// --- GET /api/events/{id} ---

#[tokio::test]
async fn test_get_event_by_id_round_trips() {
    let (app, store, _publisher) = common::build_default_app();
    let envelope = make_envelope("tweet", "firehose", 8);
    store.upsert(&envelope).await.unwrap();

    let (status, json) = common::get_json(app, &format!("/api/events/{}", envelope.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], envelope.id.to_string());
    assert_eq!(json["name"], "tweet");
}

#[tokio::test]
async fn test_get_unknown_id_is_a_404_with_error_body() {
    let (app, _store, _publisher) = common::build_default_app();
    let id = Uuid::new_v4();

    let (status, json) = common::get_json(app, &format!("/api/events/{id}")).await;

    // Not-found is a distinct outcome with an error body, never a
    // zero-value envelope.
    assert_eq!(status, StatusCode::NOT_FOUND);
    let errors = json["errors"].as_array().unwrap();
    assert!(errors[0].as_str().unwrap().contains(&id.to_string()));
    assert!(json.get("id").is_none());
}

#[tokio::test]
async fn test_get_with_malformed_id_is_a_400() {
    let (app, _store, _publisher) = common::build_default_app();

    let (status, json) = common::get_json(app, "/api/events/not-a-uuid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["errors"],
        serde_json::json!(["id must be a valid UUID string"])
    );
}
