//! Router-level behaviour: health, fallback and CORS

use axum::http::{header, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::test_server;

#[tokio::test]
async fn test_health() {
    let server = test_server(None);

    let response = server.get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = test_server(None);

    let response = server.get("/api/does-not-exist").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn test_cors_headers_are_present() {
    let server = test_server(None);

    let response = server
        .get("/api/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
        .await;

    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
