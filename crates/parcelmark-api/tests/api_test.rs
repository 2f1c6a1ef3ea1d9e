//! End-to-end tests for the map session API, driven through the router
//! with a stub geocoder.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use parcelmark_api::{create_router, AppState};
use parcelmark_core::config::{ConfigSource, LayeredConfig};
use parcelmark_core::error::{ParcelError, Result};
use parcelmark_geocode::{Geocoder, Place};
use serde_json::{json, Value};
use tokio::sync::Notify;
use tower::ServiceExt;

#[derive(Default)]
struct StubGeocoder {
    calls: AtomicUsize,
    slow_entered: Notify,
    slow_release: Notify,
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<Place>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match query {
            "Jerusalem" => Ok(vec![
                Place { lat: 31.7788, lon: 35.2258, display_name: Some("Jerusalem".into()) },
                Place { lat: 0.0, lon: 0.0, display_name: None },
            ]),
            "Eilat" => {
                self.slow_entered.notify_one();
                self.slow_release.notified().await;
                Ok(vec![Place { lat: 29.5577, lon: 34.9519, display_name: None }])
            }
            "offline" => Err(ParcelError::LookupFailed { reason: "connection refused".into() }),
            _ => Ok(vec![]),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

fn setup() -> (Router, Arc<StubGeocoder>) {
    let geocoder = Arc::new(StubGeocoder::default());
    let state = AppState::from_config(LayeredConfig::with_defaults(), geocoder.clone()).unwrap();
    (create_router(Arc::new(state)), geocoder)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

fn scenario_vertices() -> Value {
    json!({ "vertices": [[31.70, 35.20], [31.70, 35.21], [31.71, 35.21], [31.71, 35.20]] })
}

async fn create_draft(app: &Router) -> Value {
    let (status, draft) =
        send(app, Method::POST, "/api/v1/drafts", Some(scenario_vertices())).await;
    assert_eq!(status, StatusCode::CREATED);
    draft
}

#[tokio::test]
async fn test_health() {
    let (app, _) = setup();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_draw_save_delete_scenario() {
    let (app, _) = setup();

    let draft = create_draft(&app).await;
    assert_eq!(draft["status"], "draft");
    assert_eq!(draft["name"], "Polygon 1");
    let area = draft["area_m2"].as_f64().unwrap();
    assert!((area - 1_054_270.77).abs() < 1.0, "area {}", area);
    assert_eq!(draft["estimated_price"].as_f64().unwrap(), area * 0.5);

    // Not listed until committed
    let (_, listed) = send(&app, Method::GET, "/api/v1/polygons", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);

    let id = draft["id"].as_str().unwrap().to_string();
    let (status, stored) =
        send(&app, Method::POST, &format!("/api/v1/drafts/{}/commit", id), Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stored["status"], "stored");
    assert_eq!(stored["id"], id);

    let (_, listed) = send(&app, Method::GET, "/api/v1/polygons", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Polygon 1");

    let (status, deleted) =
        send(&app, Method::DELETE, &format!("/api/v1/polygons/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["removed"], true);

    let (_, listed) = send(&app, Method::GET, "/api/v1/polygons", None).await;
    assert!(listed.as_array().unwrap().is_empty());

    // Deleting again is a no-op, not an error
    let (status, deleted) =
        send(&app, Method::DELETE, &format!("/api/v1/polygons/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["removed"], false);
}

#[tokio::test]
async fn test_rename_then_commit() {
    let (app, _) = setup();
    let draft = create_draft(&app).await;
    let id = draft["id"].as_str().unwrap();

    let (status, renamed) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/drafts/{}", id),
        Some(json!({ "name": "Almond orchard" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Almond orchard");

    let (_, stored) =
        send(&app, Method::POST, &format!("/api/v1/drafts/{}/commit", id), Some(json!({}))).await;
    assert_eq!(stored["name"], "Almond orchard");

    // Committed drafts are no longer pending
    let (status, _) = send(&app, Method::GET, &format!("/api/v1/drafts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_discard_and_dispatch_never_store() {
    let (app, _) = setup();

    let first = create_draft(&app).await;
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/drafts/{}", first["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let second = create_draft(&app).await;
    assert_eq!(second["name"], "Polygon 2");
    let (status, ack) = send(
        &app,
        Method::POST,
        &format!("/api/v1/drafts/{}/dispatch", second["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["success"], true);

    let (_, listed) = send(&app, Method::GET, "/api/v1/polygons", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_default_names_are_not_reused() {
    let (app, _) = setup();

    let first = create_draft(&app).await;
    let first_id = first["id"].as_str().unwrap();
    send(&app, Method::POST, &format!("/api/v1/drafts/{}/commit", first_id), Some(json!({})))
        .await;
    send(&app, Method::DELETE, &format!("/api/v1/polygons/{}", first_id), None).await;

    let next = create_draft(&app).await;
    assert_eq!(next["name"], "Polygon 2");
}

#[tokio::test]
async fn test_invalid_rings_rejected() {
    let (app, _) = setup();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/drafts",
        Some(json!({ "vertices": [[31.7, 35.2], [31.7, 35.21]] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid polygon");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/drafts",
        Some(json!({ "vertices": [[91.0, 35.2], [31.7, 35.21], [31.8, 35.21]] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = send(&app, Method::GET, "/api/v1/polygons", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let (app, _) = setup();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/00000000-0000-4000-8000-000000000000/commit",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/polygons/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_found_recenters_view() {
    let (app, _) = setup();

    let (_, view) = send(&app, Method::GET, "/api/v1/view", None).await;
    assert_eq!(view["zoom"], 8);

    let (status, found) = send(&app, Method::GET, "/api/v1/search?q=Jerusalem", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["outcome"], "found");
    assert_eq!(found["stale"], false);
    assert_eq!(found["zoom"], 16);
    assert_eq!(found["center"]["lat"], 31.7788);
    assert!(found.get("notice").is_none());

    let (_, view) = send(&app, Method::GET, "/api/v1/view", None).await;
    assert_eq!(view["zoom"], 16);
    assert_eq!(view["center"]["lon"], 35.2258);
}

#[tokio::test]
async fn test_search_no_match_and_failure_notices() {
    let (app, _) = setup();

    let (_, none) = send(&app, Method::GET, "/api/v1/search?q=Atlantis", None).await;
    assert_eq!(none["outcome"], "no_match");
    assert_eq!(none["notice"]["title"], "No results found");

    let (_, failed) = send(&app, Method::GET, "/api/v1/search?q=offline", None).await;
    assert_eq!(failed["outcome"], "failed");
    assert_eq!(failed["notice"]["title"], "Search failed");

    // Neither moved the map
    let (_, view) = send(&app, Method::GET, "/api/v1/view", None).await;
    assert_eq!(view["zoom"], 8);
    assert_eq!(view["center"]["lat"], 31.7683);
}

#[tokio::test]
async fn test_blank_search_skips_geocoder() {
    let (app, geocoder) = setup();

    let (_, skipped) = send(&app, Method::GET, "/api/v1/search?q=%20%20", None).await;
    assert_eq!(skipped["outcome"], "skipped");
    let (_, skipped) = send(&app, Method::GET, "/api/v1/search", None).await;
    assert_eq!(skipped["outcome"], "skipped");

    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_stale_search_does_not_recenter() {
    let (app, geocoder) = setup();

    let slow_app = app.clone();
    let slow = tokio::spawn(async move {
        send(&slow_app, Method::GET, "/api/v1/search?q=Eilat", None).await
    });

    // Wait until the slow search holds its ticket, then overtake it
    geocoder.slow_entered.notified().await;
    let (_, fast) = send(&app, Method::GET, "/api/v1/search?q=Jerusalem", None).await;
    assert_eq!(fast["stale"], false);

    geocoder.slow_release.notify_one();
    let (_, late) = slow.await.unwrap();
    assert_eq!(late["outcome"], "found");
    assert_eq!(late["stale"], true);
    assert!(late.get("center").is_none());

    let (_, view) = send(&app, Method::GET, "/api/v1/view", None).await;
    assert_eq!(view["center"]["lat"], 31.7788);
}

#[tokio::test]
async fn test_geojson_export() {
    let (app, _) = setup();
    let draft = create_draft(&app).await;
    let id = draft["id"].as_str().unwrap();
    send(&app, Method::POST, &format!("/api/v1/drafts/{}/commit", id), Some(json!({}))).await;

    let (status, collection) = send(&app, Method::GET, "/api/v1/export/geojson", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(collection["type"], "FeatureCollection");

    let feature = &collection["features"][0];
    assert_eq!(feature["properties"]["id"], id);
    assert_eq!(feature["geometry"]["type"], "Polygon");
    // Closed ring in lon/lat order
    let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], json!([35.20, 31.70]));
}

#[tokio::test]
async fn test_config_reports_sources() {
    let mut config = LayeredConfig::with_defaults();
    config.unit_price.update(2.0, ConfigSource::File);

    let state = AppState::from_config(config, Arc::new(StubGeocoder::default())).unwrap();
    let app = create_router(Arc::new(state));

    let (_, body) = send(&app, Method::GET, "/api/v1/config", None).await;
    assert_eq!(body["unit_price"]["value"], "2");
    assert_eq!(body["unit_price"]["source"], "File");
    assert_eq!(body["area_model"]["source"], "Default");

    let draft = create_draft(&app).await;
    assert_eq!(
        draft["estimated_price"].as_f64().unwrap(),
        draft["area_m2"].as_f64().unwrap() * 2.0
    );
}

#[tokio::test]
async fn test_commit_without_body_keeps_name() {
    let (app, _) = setup();
    let draft = create_draft(&app).await;
    let id = draft["id"].as_str().unwrap();

    let (status, stored) =
        send(&app, Method::POST, &format!("/api/v1/drafts/{}/commit", id), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stored["name"], "Polygon 1");
}

#[tokio::test]
async fn test_new_drawing_replaces_unsaved_draft() {
    let (app, _) = setup();
    let first = create_draft(&app).await;
    let second = create_draft(&app).await;
    assert_eq!(second["name"], "Polygon 2");

    let first_id = first["id"].as_str().unwrap();
    let (status, _) = send(&app, Method::GET, &format!("/api/v1/drafts/{}", first_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/drafts/{}/commit", first_id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(&app, Method::GET, "/api/v1/polygons", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}
