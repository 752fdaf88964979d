//! HTTP API tests: end-to-end pipeline behavior through the router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt; // for oneshot

use hearth_domain::TokenService;
use hearth_storage::MemoryFamilyStore;

use super::routes::create_router;
use super::state::AppState;

const SECRET: &[u8] = b"test-secret";

struct TestApp {
    app: Router,
    head_token: String,
    member_token: String,
    unverified_token: String,
    member_id: i64,
}

/// Builds a router over a seeded family: a verified head, a verified member,
/// and a verified user with no family.
fn test_app() -> TestApp {
    let store = MemoryFamilyStore::new_shared();
    let tokens = TokenService::new(SECRET);

    let family_id = store.add_family("smiths");
    let head = store.add_user("ann@example.com", "Ann", "Smith", true, Some(family_id));
    let member = store.add_user("bob@example.com", "Bob", "Smith", true, Some(family_id));
    let unverified = store.add_user("kim@example.com", "Kim", "Smith", false, Some(family_id));

    let head_token = tokens.issue(head, "ann@example.com").unwrap();
    let member_token = tokens.issue(member, "bob@example.com").unwrap();
    let unverified_token = tokens.issue(unverified, "kim@example.com").unwrap();

    TestApp {
        app: create_router(AppState::new(store, SECRET)),
        head_token,
        member_token,
        unverified_token,
        member_id: member,
    }
}

/// Sends one request and returns the status plus the parsed JSON body.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let t = test_app();
    let (status, json) = send(&t.app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_then_list_todos() {
    let t = test_app();

    let (status, json) = send(
        &t.app,
        "POST",
        "/api/todos",
        Some(&t.head_token),
        Some(r#"{"title": "mow the lawn", "description": "front only"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "todos-created");

    let (status, json) = send(&t.app, "GET", "/api/todos", Some(&t.member_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let todos = json["todos"].as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["title"], "mow the lawn");
    assert_eq!(todos[0]["description"], "front only");
    assert_eq!(todos[0]["isDone"], false);
}

#[tokio::test]
async fn test_create_todo_requires_title() {
    let t = test_app();

    let (status, json) = send(
        &t.app,
        "POST",
        "/api/todos",
        Some(&t.head_token),
        Some(r#"{"title": "   "}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"]["title"], "is-required");
}

#[tokio::test]
async fn test_unverified_user_has_no_permissions() {
    let t = test_app();

    let (status, json) = send(
        &t.app,
        "GET",
        "/api/todos",
        Some(&t.unverified_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"]["user"], "user-has-no-permissions");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let t = test_app();

    let (status, json) = send(
        &t.app,
        "POST",
        "/api/todos",
        Some(&t.head_token),
        Some(r#"{"title": "#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"]["payload"], "not-allowed-value");
}

#[tokio::test]
async fn test_update_rejects_unknown_payload_keys() {
    let t = test_app();

    let (status, json) = send(
        &t.app,
        "PATCH",
        "/api/todos/1",
        Some(&t.member_token),
        Some(r#"{"title": "ok", "authorId": 42}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"]["payload"], "not-allowed-value");
}

#[tokio::test]
async fn test_get_unknown_todo_is_not_found() {
    let t = test_app();

    let (status, json) = send(&t.app, "GET", "/api/todos/999", Some(&t.head_token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["errors"]["todo"], "not-found");
}

#[tokio::test]
async fn test_delete_all_todos_on_empty_family_conflicts() {
    let t = test_app();

    let (status, json) = send(&t.app, "DELETE", "/api/todos", Some(&t.head_token), None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["errors"]["todos"], "todos-already-empty");
}

#[tokio::test]
async fn test_delete_all_todos_is_head_only() {
    let t = test_app();

    send(
        &t.app,
        "POST",
        "/api/todos",
        Some(&t.head_token),
        Some(r#"{"title": "dishes"}"#),
    )
    .await;

    let (status, json) = send(&t.app, "DELETE", "/api/todos", Some(&t.member_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"]["user"], "user-has-no-permissions");

    let (status, json) = send(&t.app, "DELETE", "/api/todos", Some(&t.head_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "todos-all-deleted");
}

#[tokio::test]
async fn test_tampered_token_is_internal_error() {
    let t = test_app();
    let tampered = format!("{}x", t.head_token);

    let (status, json) = send(&t.app, "GET", "/api/todos", Some(&tampered), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["errors"]["error"], "something-went-wrong");
}

#[tokio::test]
async fn test_missing_credential_is_internal_error() {
    let t = test_app();

    let (status, json) = send(&t.app, "GET", "/api/todos", None, None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["errors"]["error"], "something-went-wrong");
}

#[tokio::test]
async fn test_head_transfer_roundtrip() {
    let t = test_app();
    let body = format!(r#"{{"userToAssignId": {}}}"#, t.member_id);

    let (status, json) = send(
        &t.app,
        "PATCH",
        "/api/families/head",
        Some(&t.head_token),
        Some(&body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "account-family-head-assigned");

    // The old head lost headship, so a second transfer attempt fails.
    let (status, json) = send(
        &t.app,
        "PATCH",
        "/api/families/head",
        Some(&t.head_token),
        Some(&body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"]["email"], "account-is-no-family-head");
}

#[tokio::test]
async fn test_head_transfer_requires_target_id() {
    let t = test_app();

    let (status, json) = send(
        &t.app,
        "PATCH",
        "/api/families/head",
        Some(&t.head_token),
        Some("{}"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"]["userToAssignId"], "is-required");
}

#[tokio::test]
async fn test_create_shopping_list_requires_items() {
    let t = test_app();

    let (status, json) = send(
        &t.app,
        "POST",
        "/api/shopping-lists",
        Some(&t.head_token),
        Some(r#"{"title": "groceries", "items": []}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"]["payload"], "is-required");
}

#[tokio::test]
async fn test_shopping_list_items_are_partitioned() {
    let t = test_app();

    let (status, json) = send(
        &t.app,
        "POST",
        "/api/shopping-lists",
        Some(&t.member_token),
        Some(
            r#"{
                "title": "groceries",
                "items": [
                    {"name": "milk"},
                    {"name": "bread", "isDone": true},
                    {"name": "eggs"}
                ]
            }"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "shopping-list-created");

    let (status, json) = send(
        &t.app,
        "GET",
        "/api/shopping-lists",
        Some(&t.head_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let lists = json["shoppingLists"].as_array().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0]["upcomingItems"], serde_json::json!(["milk", "eggs"]));
    assert_eq!(lists[0]["doneItems"], serde_json::json!(["bread"]));
}
