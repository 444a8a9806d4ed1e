// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router tests driven through `tower::ServiceExt::oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod contributor_route_tests;
mod tier_list_route_tests;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use hunterboard_api::MemoryAssetStore;
use hunterboard_domain::Weapon;
use hunterboard_persistence::Persistence;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::live::LiveEventBroadcaster;
use crate::{AppState, build_router};

pub const TEST_TOKEN: &str = "test-admin-token";

const SEED: &str = include_str!("../../data/weapons.seed.json");

/// Creates test app state with an in-memory database holding the seed catalog.
pub fn create_test_app_state(admin_token: Option<&str>) -> (AppState, Arc<MemoryAssetStore>) {
    let mut persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let catalog: Vec<Weapon> = serde_json::from_str(SEED).unwrap();
    persistence.import_weapons(&catalog).unwrap();

    let assets = Arc::new(MemoryAssetStore::new());
    let app_state = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        assets: assets.clone(),
        admin_token: admin_token.map(Arc::from),
        live_events: Arc::new(LiveEventBroadcaster::new()),
        request_timeout: Duration::from_secs(5),
    };
    (app_state, assets)
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Creates a role through the API and returns its id.
pub async fn create_role_via_api(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/roles",
        Some(TEST_TOKEN),
        Some(serde_json::json!({
            "name": name,
            "gradient": "from-purple-500 to-blue-500",
            "border_color": "border-purple-400",
            "icon": null,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["role"]["role_id"].as_i64().unwrap()
}

pub fn test_router() -> (Router, AppState, Arc<MemoryAssetStore>) {
    let (app_state, assets) = create_test_app_state(Some(TEST_TOKEN));
    (build_router(app_state.clone()), app_state, assets)
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = test_router();

    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[test]
fn test_seed_file_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/weapons.seed.json");

    let catalog = crate::load_weapon_seed(&path).unwrap();

    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog[6].element, None);
}

#[tokio::test]
async fn test_builds_routes() {
    let (app, _, _) = test_router();

    let (status, body) = send(&app, "GET", "/builds", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["builds"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, "GET", "/builds/sung-jinwoo", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["character_name"], "Sung Jinwoo");

    let (status, body) = send(&app, "GET", "/builds/go-gunhee", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_busy_database_times_out() {
    let (mut app_state, _) = create_test_app_state(Some(TEST_TOKEN));
    app_state.request_timeout = Duration::from_millis(50);
    let app = build_router(app_state.clone());

    let guard = app_state.persistence.lock().await;
    let (status, body) = send(&app, "GET", "/roles", None, None).await;
    drop(guard);

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], true);

    let (status, _) = send(&app, "GET", "/roles", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
