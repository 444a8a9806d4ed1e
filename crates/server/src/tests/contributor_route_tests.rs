// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use hunterboard_domain::MAX_IMAGE_BYTES;
use serde_json::json;

use super::{TEST_TOKEN, create_role_via_api, send, test_router};

#[tokio::test]
async fn test_create_contributor_with_image() {
    let (app, _, assets) = test_router();
    let role_id = create_role_via_api(&app, "Artist").await;

    let (status, body) = send(
        &app,
        "POST",
        "/contributors",
        Some(TEST_TOKEN),
        Some(json!({
            "name": "Jinah",
            "role_id": role_id,
            "rank": 1,
            "discord_username": "jinah",
            "image_upload": { "content_type": "image/png", "data_base64": "iVBORw0KGgo=" },
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let reference = body["contributor"]["image"].as_str().unwrap();
    assert!(reference.ends_with(".png"));
    assert_eq!(assets.len(), 1);
    assert!(assets.get(reference).is_some());
    assert_eq!(body["contributor"]["role_name"], "Artist");
}

#[tokio::test]
async fn test_image_near_size_limit_is_accepted() {
    let (app, _, assets) = test_router();
    let role_id = create_role_via_api(&app, "Artist").await;
    // 1,800,000 zero bytes
    let data_base64 = "AAAA".repeat(600_000);

    let (status, body) = send(
        &app,
        "POST",
        "/contributors",
        Some(TEST_TOKEN),
        Some(json!({
            "name": "Jinah",
            "role_id": role_id,
            "image_upload": { "content_type": "image/png", "data_base64": data_base64 },
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let reference = body["contributor"]["image"].as_str().unwrap();
    assert_eq!(assets.get(reference).unwrap().len(), 1_800_000);
}

#[tokio::test]
async fn test_image_over_size_limit_is_bad_request() {
    let (app, _, assets) = test_router();
    let role_id = create_role_via_api(&app, "Artist").await;
    let data_base64 = "AAAA".repeat(MAX_IMAGE_BYTES.div_ceil(3) + 1);

    let (status, body) = send(
        &app,
        "POST",
        "/contributors",
        Some(TEST_TOKEN),
        Some(json!({
            "name": "Jinah",
            "role_id": role_id,
            "image_upload": { "content_type": "image/png", "data_base64": data_base64 },
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert!(assets.is_empty());
}

#[tokio::test]
async fn test_invalid_base64_is_bad_request() {
    let (app, _, assets) = test_router();
    let role_id = create_role_via_api(&app, "Artist").await;

    let (status, body) = send(
        &app,
        "POST",
        "/contributors",
        Some(TEST_TOKEN),
        Some(json!({
            "name": "Jinah",
            "role_id": role_id,
            "image_upload": { "content_type": "image/png", "data_base64": "%%%" },
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("image"));
    assert!(assets.is_empty());
}

#[tokio::test]
async fn test_missing_role_is_bad_request() {
    let (app, _, _) = test_router();

    let (status, _) = send(
        &app,
        "POST",
        "/contributors",
        Some(TEST_TOKEN),
        Some(json!({ "name": "Jinah", "role_id": null })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggle_then_filter_by_status() {
    let (app, _, _) = test_router();
    let role_id = create_role_via_api(&app, "Developer").await;
    let (_, body) = send(
        &app,
        "POST",
        "/contributors",
        Some(TEST_TOKEN),
        Some(json!({ "name": "Ana", "role_id": role_id, "rank": 0 })),
    )
    .await;
    let id = body["contributor"]["contributor_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/contributors/{id}/toggle_active"),
        Some(TEST_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contributor"]["active"], false);

    let (_, body) = send(&app, "GET", "/contributors?status=active", None, None).await;
    assert!(body["contributors"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, "GET", "/contributors?status=inactive&search=dev", None, None).await;
    assert_eq!(body["contributors"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", "/contributors", None, None).await;
    assert_eq!(body["contributors"][0]["name"], "Ana");
}

#[tokio::test]
async fn test_unknown_status_is_bad_request() {
    let (app, _, _) = test_router();

    let (status, body) = send(&app, "GET", "/contributors?status=retired", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("retired"));
}

#[tokio::test]
async fn test_update_and_delete_contributor() {
    let (app, _, _) = test_router();
    let role_id = create_role_via_api(&app, "Developer").await;
    let (_, body) = send(
        &app,
        "POST",
        "/contributors",
        Some(TEST_TOKEN),
        Some(json!({ "name": "Ana", "role_id": role_id, "rank": 3 })),
    )
    .await;
    let id = body["contributor"]["contributor_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/contributors/{id}"),
        Some(TEST_TOKEN),
        Some(json!({ "name": "Ana Kim", "role_id": role_id, "rank": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contributor"]["name"], "Ana Kim");
    assert_eq!(body["contributor"]["rank"], 0);

    let (status, _) = send(&app, "DELETE", &format!("/contributors/{id}"), Some(TEST_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &format!("/contributors/{id}"), Some(TEST_TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
