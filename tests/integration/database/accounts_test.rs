//! Registration, login and profile against PostgreSQL

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::TestDatabase;

fn unique_name() -> String {
    format!("reader_{}", &Uuid::new_v4().simple().to_string()[..10])
}

#[tokio::test]
async fn test_register_login_and_profile() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let username = unique_name();
    let email = format!("{username}@Example.com");

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": "password123",
            "full_name": "Ada Reader"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], email.to_lowercase());
    assert!(body["user"].get("password_hash").is_none());

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let token = response.json::<Value>()["token"].as_str().unwrap().to_string();

    let response = server.get("/api/auth/profile").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["username"], username);
    assert_eq!(body["user"]["full_name"], "Ada Reader");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let existing = db.user().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": unique_name(),
            "email": existing.email,
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let user = db.user().await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": user.email, "password": "not-the-password" }))
        .await;
    let unknown_user = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody-here@example.com", "password": "whatever1" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json::<Value>(), unknown_user.json::<Value>());
}

#[tokio::test]
async fn test_profile_update_keeps_unset_fields() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let user = db.user().await;

    let response = server
        .put("/api/auth/profile")
        .authorization_bearer(&user.token)
        .json(&json!({ "phone": "555-0100" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["phone"], "555-0100");
    assert_eq!(body["user"]["full_name"], format!("Test {}", user.username));
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let user = db.user().await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(db.pool())
        .await
        .unwrap();

    let response = server.get("/api/auth/profile").authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
