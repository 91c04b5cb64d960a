//! Messaging and profile API tests that need no database

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{anonymous_token, test_server};

#[tokio::test]
async fn test_messaging_requires_authentication() {
    let server = test_server(None);
    let id = Uuid::new_v4();

    let responses = vec![
        server.get("/api/messages/conversations").await,
        server.get(&format!("/api/messages/conversation/{id}")).await,
        server.post("/api/messages/send").json(&json!({})).await,
        server.get("/api/messages/unread-count").await,
        server.put(&format!("/api/messages/{id}/read")).await,
        server.delete(&format!("/api/messages/{id}")).await,
        server.put("/api/profiles/me").json(&json!({})).await,
        server.post(&format!("/api/profiles/follow/{id}")).await,
        server.delete(&format!("/api/profiles/follow/{id}")).await,
        server.get(&format!("/api/profiles/follow/check/{id}")).await,
    ];

    for response in responses {
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_message_needs_recipient_and_body() {
    let server = test_server(None);

    let response = server
        .post("/api/messages/send")
        .authorization_bearer(anonymous_token())
        .json(&json!({ "recipient_id": Uuid::new_v4(), "message": "  " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Recipient and message are required");
}

#[tokio::test]
async fn test_negative_reading_goal_is_rejected() {
    let server = test_server(None);

    let response = server
        .put("/api/profiles/me")
        .authorization_bearer(anonymous_token())
        .json(&json!({ "reading_goal": -3 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Reading goal cannot be negative");
}

#[tokio::test]
async fn test_public_profile_without_database_is_unavailable() {
    let server = test_server(None);

    let profile = server.get("/api/profiles/reader").await;
    assert_eq!(profile.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let followers = server
        .get(&format!("/api/profiles/{}/followers", Uuid::new_v4()))
        .await;
    assert_eq!(followers.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_follower_list_needs_user_id() {
    let server = test_server(None);

    let response = server.get("/api/profiles/reader/followers").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}
