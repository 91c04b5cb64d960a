//! Test server helpers

use axum_test::TestServer;
use book_bazaar::backend::auth::SessionKeys;
use book_bazaar::backend::{build_app, AppState};
use chrono::Duration;
use sqlx::PgPool;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn test_keys() -> SessionKeys {
    SessionKeys::new(TEST_JWT_SECRET, Duration::hours(1))
}

/// A server over the real router; `None` runs it without a database
pub fn test_server(pool: Option<PgPool>) -> TestServer {
    let app = build_app(AppState::new(pool, test_keys()));
    TestServer::new(app).expect("Failed to start test server")
}
