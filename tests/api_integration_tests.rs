//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use session_store::{api::create_router, session::MEMORY_PROVIDER, AppState, ProviderRegistry};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::in_memory(Duration::from_secs(300)))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Session Lifecycle ==

#[tokio::test]
async fn test_create_and_describe_session() {
    let app = create_test_app();

    let (status, json) = send(&app, request("POST", "/sessions/abc", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "abc");
    assert_eq!(json["keys"], 0);

    let (status, json) = send(&app, request("GET", "/sessions/abc", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "abc");
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_create_duplicate_session_conflicts() {
    let app = create_test_app();

    send(&app, request("POST", "/sessions/dup", None)).await;
    let (status, json) = send(&app, request("POST", "/sessions/dup", None)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("dup"));
}

#[tokio::test]
async fn test_describe_unknown_session() {
    let app = create_test_app();

    let (status, json) = send(&app, request("GET", "/sessions/ghost", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_destroy_session_is_idempotent() {
    let app = create_test_app();
    send(&app, request("POST", "/sessions/bye", None)).await;

    let (status, _) = send(&app, request("DELETE", "/sessions/bye", None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("DELETE", "/sessions/bye", None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("GET", "/sessions/bye", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Session Values ==

#[tokio::test]
async fn test_set_then_get_value() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        request(
            "PUT",
            "/sessions/s1/values/cart",
            Some(json!({"value": {"items": [1, 2, 3]}})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("cart"));

    let (status, json) = send(&app, request("GET", "/sessions/s1/values/cart", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["session_id"], "s1");
    assert_eq!(json["value"]["items"][2], 3);
}

#[tokio::test]
async fn test_set_value_creates_session() {
    let app = create_test_app();

    send(
        &app,
        request("PUT", "/sessions/implicit/values/k", Some(json!({"value": 1}))),
    )
    .await;

    let (status, json) = send(&app, request("GET", "/sessions/implicit", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["keys"], 1);
}

#[tokio::test]
async fn test_get_unset_value_is_null() {
    let app = create_test_app();

    let (status, json) = send(&app, request("GET", "/sessions/s1/values/missing", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["value"].is_null());
}

#[tokio::test]
async fn test_delete_value() {
    let app = create_test_app();
    send(
        &app,
        request("PUT", "/sessions/s1/values/k", Some(json!({"value": "v"}))),
    )
    .await;

    let (status, _) = send(&app, request("DELETE", "/sessions/s1/values/k", None)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, request("GET", "/sessions/s1/values/k", None)).await;
    assert!(json["value"].is_null());

    // Deleting again is not an error
    let (status, _) = send(&app, request("DELETE", "/sessions/s1/values/k", None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_set_value_invalid_body() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/sessions/s1/values/k")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"wrong":"field"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_session_id_too_long() {
    let app = create_test_app();
    let uri = format!("/sessions/{}", "x".repeat(300));

    let (status, _) = send(&app, request("POST", &uri, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Garbage Collection ==

#[tokio::test]
async fn test_gc_zero_ttl_evicts_all() {
    let app = create_test_app();
    send(&app, request("POST", "/sessions/a", None)).await;
    send(&app, request("POST", "/sessions/b", None)).await;

    let (status, json) = send(&app, request("POST", "/gc", Some(json!({"ttl": 0})))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["evicted"], 2);
    assert_eq!(json["remaining"], 0);

    let (status, _) = send(&app, request("GET", "/sessions/a", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_gc_default_ttl_keeps_fresh_sessions() {
    let app = create_test_app();
    send(&app, request("POST", "/sessions/a", None)).await;

    let (_, json) = send(&app, request("POST", "/gc", Some(json!({})))).await;

    assert_eq!(json["evicted"], 0);
    assert_eq!(json["remaining"], 1);
}

#[tokio::test]
async fn test_gc_spares_recently_read_session() {
    let app = create_test_app();
    send(&app, request("POST", "/sessions/old", None)).await;
    send(&app, request("POST", "/sessions/young", None)).await;

    tokio::time::sleep(Duration::from_millis(1200)).await;
    // A read counts as activity
    send(&app, request("GET", "/sessions/old/values/anything", None)).await;

    let (_, json) = send(&app, request("POST", "/gc", Some(json!({"ttl": 1})))).await;
    assert_eq!(json["evicted"], 1);

    let (status, _) = send(&app, request("GET", "/sessions/old", None)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, request("GET", "/sessions/young", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Stats & Health ==

#[tokio::test]
async fn test_stats_reflect_lifecycle() {
    let app = create_test_app();
    send(&app, request("POST", "/sessions/a", None)).await;
    send(&app, request("POST", "/sessions/a", None)).await;
    send(&app, request("POST", "/sessions/b", None)).await;
    send(&app, request("DELETE", "/sessions/b", None)).await;

    let (status, json) = send(&app, request("GET", "/stats", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["provider"], "memory");
    assert_eq!(json["created"], 2);
    assert_eq!(json["rejected"], 1);
    assert_eq!(json["destroyed"], 1);
    assert_eq!(json["live_sessions"], 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, request("GET", "/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

// == Registry-built State ==

#[tokio::test]
async fn test_app_over_registry_provider() {
    let registry: ProviderRegistry = ProviderRegistry::with_defaults();
    let sessions = registry.create(MEMORY_PROVIDER).unwrap();
    let app = create_router(AppState::new(
        Arc::clone(&sessions),
        MEMORY_PROVIDER,
        Duration::from_secs(60),
    ));

    send(
        &app,
        request("PUT", "/sessions/reg/values/k", Some(json!({"value": true}))),
    )
    .await;

    let session = sessions.lookup("reg").unwrap();
    assert_eq!(session.get("k"), Some(json!(true)));
}
