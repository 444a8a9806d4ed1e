// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::{Value, json};

use super::{TEST_TOKEN, send, test_router};
use crate::live::{Collection, LiveEvent};

fn bucket_ids(body: &Value, label: &str) -> Vec<i64> {
    body["tiers"][label]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["weapon_id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_empty_tier_list_has_all_labels() {
    let (app, _, _) = test_router();

    let (status, body) = send(&app, "GET", "/tier_list", None, None).await;

    assert_eq!(status, StatusCode::OK);
    for label in ["SSS", "SS", "S", "A", "B", "C", "D"] {
        assert_eq!(bucket_ids(&body, label), Vec::<i64>::new());
    }

    let (_, body) = send(&app, "GET", "/tier_list/exists", None, None).await;
    assert_eq!(body["exists"], false);
}

#[tokio::test]
async fn test_save_and_load_tier_list() {
    let (app, app_state, _) = test_router();
    let mut rx = app_state.live_events.subscribe();

    let (status, body) = send(
        &app,
        "PUT",
        "/tier_list",
        Some(TEST_TOKEN),
        Some(json!({ "tiers": { "S": [7, 3, 5], "SSS": [1] } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["saved_entries"], 4);
    assert_eq!(
        rx.try_recv().unwrap(),
        LiveEvent::CollectionChanged {
            collection: Collection::TierList
        }
    );

    let (_, body) = send(&app, "GET", "/tier_list", None, None).await;
    assert_eq!(bucket_ids(&body, "S"), vec![7, 3, 5]);
    assert_eq!(bucket_ids(&body, "SSS"), vec![1]);
    assert_eq!(body["tiers"]["SSS"][0]["name"], "Demon King's Daggers");

    let (_, body) = send(&app, "GET", "/tier_list/exists", None, None).await;
    assert_eq!(body["exists"], true);
}

#[tokio::test]
async fn test_failed_save_keeps_previous_list() {
    let (app, _, _) = test_router();
    send(
        &app,
        "PUT",
        "/tier_list",
        Some(TEST_TOKEN),
        Some(json!({ "tiers": { "A": [2, 4] } })),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        "/tier_list",
        Some(TEST_TOKEN),
        Some(json!({ "tiers": { "B": [999] } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, "GET", "/tier_list", None, None).await;
    assert_eq!(bucket_ids(&body, "A"), vec![2, 4]);
    assert!(bucket_ids(&body, "B").is_empty());
}

#[tokio::test]
async fn test_save_requires_admin() {
    let (app, _, _) = test_router();

    let (status, _) = send(
        &app,
        "PUT",
        "/tier_list",
        None,
        Some(json!({ "tiers": { "A": [1] } })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_weapon_routes() {
    let (app, _, _) = test_router();

    let (status, body) = send(&app, "GET", "/weapons", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weapons"].as_array().unwrap().len(), 7);

    let (_, body) = send(&app, "GET", "/weapons?element=Dark", None, None).await;
    let names: Vec<&str> = body["weapons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Demon King's Daggers", "Kasaka's Venom Fang"]);

    let (status, body) = send(&app, "GET", "/weapons/3", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Orb of Avarice");

    let (status, body) = send(&app, "GET", "/weapons/99", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
}
