//! Request-executor contract, exercised against an in-process stub.
//!
//! The load-bearing behavior: an HTTP error status comes back as a
//! normal response for the test to assert on, while transport failures
//! (timeout, refused connection) are errors. These suites run without
//! the real backend.

mod helpers;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::time::Duration;

use helpers::StubServer;
use storecheck_e2e::{ApiError, ApiRequest};

fn stub_app() -> Router {
    Router::new()
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))) }),
        )
        .route(
            "/boom",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "server exploded"})),
                )
            }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"ok": true}))
            }),
        )
        .route(
            "/echo",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"authorization": auth, "payload": body}))
            }),
        )
}

#[tokio::test]
async fn http_error_status_is_returned_not_raised() {
    let stub = StubServer::spawn(stub_app()).await;
    let ctx = stub.context();

    let response = ctx.client.send(ApiRequest::get("missing")).await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.json().unwrap()["detail"], "Not found.");

    let response = ctx.client.send(ApiRequest::get("boom")).await.unwrap();
    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn connection_failure_is_fatal() {
    // Nothing listens on the discard port.
    let ctx = {
        let mut config = storecheck_common::SuiteConfig::default();
        config.common.base_url = "http://127.0.0.1:9/".to_string();
        storecheck_e2e::SuiteContext::new(config).unwrap()
    };

    let err = ctx
        .client
        .send(ApiRequest::get("products").timeout(Duration::from_secs(2)))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApiError::Connection(_) | ApiError::Timeout(_)),
        "expected a connection-class failure, got {err}"
    );
}

#[tokio::test]
async fn slow_response_is_a_timeout() {
    let stub = StubServer::spawn(stub_app()).await;
    let ctx = stub.context();

    let err = ctx
        .client
        .send(ApiRequest::get("slow").timeout(Duration::from_millis(200)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "got {err}");
}

#[tokio::test]
async fn headers_and_payload_pass_through() {
    let stub = StubServer::spawn(stub_app()).await;
    let ctx = stub.context();

    let response = ctx
        .client
        .send(
            ApiRequest::post("echo")
                .header("Content-Type", "application/json")
                .bearer("tok-123")
                .json(json!({"name": "Fixture Product", "countInStock": 5})),
        )
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body = response.json().unwrap();
    assert_eq!(body["authorization"], "Bearer tok-123");
    assert_eq!(body["payload"]["name"], "Fixture Product");
    assert_eq!(body["payload"]["countInStock"], 5);
}

#[tokio::test]
async fn elapsed_time_is_recorded() {
    let stub = StubServer::spawn(stub_app()).await;
    let ctx = stub.context();

    let response = ctx.client.send(ApiRequest::get("missing")).await.unwrap();
    // Loopback round-trips are fast; the measurement just has to be sane.
    assert!(response.elapsed() < Duration::from_secs(5));
}
