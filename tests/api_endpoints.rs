//! Integration tests for the todo API routes.
//!
//! Drives the full router (path parsing, JSON bodies, status codes)
//! over the in-memory repository.

mod common;

use axum::http::StatusCode;
use rstest::rstest;

use common::{delete, get, json, patch_json, post_json, test_router};

// =============================================================================
// GET /api/health
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_health_ok() {
    let (router, _) = test_router();

    let (status, body) = get(&router, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({"ok": true}));
}

#[rstest]
#[tokio::test]
async fn test_health_store_outage_is_500() {
    let (router, repository) = test_router();
    repository.set_failing(true);

    let (status, body) = get(&router, "/api/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["message"], "An internal error occurred");
}

// =============================================================================
// POST /api/todos + GET /api/todos
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_create_then_list_contains_trimmed_task() {
    let (router, _) = test_router();

    let (status, body) = post_json(&router, "/api/todos", r#"{"title":"  Walk the dog  "}"#).await;
    assert_eq!(status, StatusCode::CREATED);

    let created = json(&body);
    assert_eq!(created["title"], "Walk the dog");
    assert_eq!(created["isComplete"], false);
    assert!(created["id"].is_i64());
    assert!(created["createdAt"].is_string());

    let (status, body) = get(&router, "/api/todos").await;
    assert_eq!(status, StatusCode::OK);

    let listed = json(&body);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
}

#[rstest]
#[tokio::test]
async fn test_list_is_newest_first() {
    let (router, _) = test_router();

    post_json(&router, "/api/todos", r#"{"title":"first"}"#).await;
    post_json(&router, "/api/todos", r#"{"title":"second"}"#).await;
    post_json(&router, "/api/todos", r#"{"title":"third"}"#).await;

    let (_, body) = get(&router, "/api/todos").await;
    let titles: Vec<String> = json(&body)
        .as_array()
        .unwrap()
        .iter()
        .map(|todo| todo["title"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[rstest]
#[case(r#"{"title":""}"#)]
#[case(r#"{"title":"   "}"#)]
#[case(r#"{}"#)]
#[case(r#"{"title":42}"#)]
#[tokio::test]
async fn test_create_invalid_title_is_400_and_inserts_nothing(#[case] body: &str) {
    let (router, _) = test_router();

    let (status, response) = post_json(&router, "/api/todos", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&response)["message"], "title is required");

    let (_, listed) = get(&router, "/api/todos").await;
    assert!(json(&listed).as_array().unwrap().is_empty());
}

// =============================================================================
// PATCH /api/todos/{id}
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_toggle_twice_returns_to_original() {
    let (router, _) = test_router();
    let (_, created) = post_json(&router, "/api/todos", r#"{"title":"task"}"#).await;
    let id = json(&created)["id"].as_i64().unwrap();

    let (status, body) = patch_json(
        &router,
        &format!("/api/todos/{id}"),
        r#"{"isComplete":true}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["isComplete"], true);

    let (status, body) = patch_json(
        &router,
        &format!("/api/todos/{id}"),
        r#"{"isComplete":false}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["isComplete"], false);
}

#[rstest]
#[tokio::test]
async fn test_toggle_unknown_id_is_404() {
    let (router, _) = test_router();

    let (status, body) = patch_json(&router, "/api/todos/999", r#"{"isComplete":true}"#).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["message"], "Todo not found");
}

#[rstest]
#[case(r#"{"isComplete":"true"}"#)]
#[case(r#"{"isComplete":1}"#)]
#[case(r#"{}"#)]
#[tokio::test]
async fn test_toggle_non_boolean_flag_is_400(#[case] body: &str) {
    let (router, _) = test_router();
    let (_, created) = post_json(&router, "/api/todos", r#"{"title":"task"}"#).await;
    let id = json(&created)["id"].as_i64().unwrap();

    let (status, response) = patch_json(&router, &format!("/api/todos/{id}"), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&response)["message"], "isComplete must be boolean");
}

#[rstest]
#[case("abc")]
#[case("1.5")]
#[case("-3")]
#[case("0")]
#[tokio::test]
async fn test_toggle_malformed_id_is_400(#[case] id: &str) {
    let (router, _) = test_router();

    let (status, body) = patch_json(
        &router,
        &format!("/api/todos/{id}"),
        r#"{"isComplete":true}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["message"], "Invalid id parameter");
}

// =============================================================================
// DELETE /api/todos/{id}
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_delete_is_permanent_and_second_delete_is_404() {
    let (router, _) = test_router();
    let (_, created) = post_json(&router, "/api/todos", r#"{"title":"task"}"#).await;
    let id = json(&created)["id"].as_i64().unwrap();

    let (status, body) = delete(&router, &format!("/api/todos/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (_, listed) = get(&router, "/api/todos").await;
    assert!(json(&listed).as_array().unwrap().is_empty());

    let (status, _) = delete(&router, &format!("/api/todos/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_delete_malformed_id_is_400() {
    let (router, _) = test_router();

    let (status, body) = delete(&router, "/api/todos/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["message"], "Invalid id parameter");
}

// =============================================================================
// Infrastructure failures
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_store_outage_is_generic_500_on_every_route() {
    let (router, repository) = test_router();
    let (_, created) = post_json(&router, "/api/todos", r#"{"title":"task"}"#).await;
    let id = json(&created)["id"].as_i64().unwrap();

    repository.set_failing(true);

    let generic = serde_json::json!({"message": "An internal error occurred"});
    let (status, body) = get(&router, "/api/todos").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body), generic);

    let (status, _) = post_json(&router, "/api/todos", r#"{"title":"other"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = patch_json(
        &router,
        &format!("/api/todos/{id}"),
        r#"{"isComplete":true}"#,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = delete(&router, &format!("/api/todos/{id}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// End-to-end scenario
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_full_lifecycle() {
    let (router, _) = test_router();

    // Create with surrounding whitespace.
    let (status, body) = post_json(&router, "/api/todos", r#"{"title":" Buy milk "}"#).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = json(&body);
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["isComplete"], false);
    let id = created["id"].as_i64().unwrap();

    // Listed first.
    let (status, body) = get(&router, "/api/todos").await;
    assert_eq!(status, StatusCode::OK);
    let listed = json(&body);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], id);

    // Complete it.
    let (status, body) = patch_json(
        &router,
        &format!("/api/todos/{id}"),
        r#"{"isComplete":true}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["isComplete"], true);

    // Delete it.
    let (status, _) = delete(&router, &format!("/api/todos/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Gone for good.
    let (_, body) = get(&router, "/api/todos").await;
    assert!(json(&body).as_array().unwrap().is_empty());
}
