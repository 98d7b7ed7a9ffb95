//! End-to-end HTTP surface tests driven through `tower::ServiceExt::oneshot`
//! against a `NoopRepository`-backed engine, matching spec.md §8's
//! testable scenarios (string CAS, list update-all-occurrences,
//! dictionary duplicate-subkey rejection).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use clap::Parser;
use kv_server::config::Config;
use kv_server::state::AppState;
use kv_server::{openapi, routes};

async fn test_app() -> axum::Router {
    let config = Config::parse_from(["kv-server", "--shards", "2", "--no-persistence"]);
    let state = std::sync::Arc::new(AppState::start(&config).await.unwrap());
    openapi::mount(routes::build_router(state))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn string_cas_follows_the_scripted_scenario() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/string")
                .header("content-type", "application/json")
                .body(Body::from(json!({"key": "k", "value": "a"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::put("/api/string/k")
                .header("content-type", "application/json")
                .body(Body::from(json!({"value": "b", "original": "a"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(
            Request::put("/api/string/k")
                .header("content-type", "application/json")
                .body(Body::from(json!({"value": "c", "original": "a"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(Request::get("/api/string/k").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["key"], "k");
    assert_eq!(body["value"], "b");
}

#[tokio::test]
async fn list_update_rewrites_every_occurrence() {
    let app = test_app().await;

    app.clone()
        .oneshot(
            Request::post("/api/list")
                .header("content-type", "application/json")
                .body(Body::from(json!({"key": "L", "values": ["x", "y", "x"]}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::put("/api/list/L/x")
                .header("content-type", "application/json")
                .body(Body::from(json!({"value": "z"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(Request::get("/api/list/L").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["values"], json!(["z", "y", "z"]));
}

#[tokio::test]
async fn dictionary_rejects_duplicate_subkey() {
    let app = test_app().await;

    app.clone()
        .oneshot(
            Request::post("/api/dictionary")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"key": "D", "values": [{"key": "a", "value": "1"}]}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/dictionary/D")
                .header("content-type", "application/json")
                .body(Body::from(json!({"value": {"key": "a", "value": "2"}}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(Request::get("/api/dictionary/D").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["values"], json!([{"key": "a", "value": "1"}]));
}

#[tokio::test]
async fn malformed_body_is_a_bad_request_not_an_unprocessable_entity() {
    let app = test_app().await;

    // Valid JSON, but missing the required `value` field.
    let response = app
        .oneshot(
            Request::post("/api/string")
                .header("content-type", "application/json")
                .body(Body::from(json!({"key": "k"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["status"].as_str().is_some());
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
