/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL and run migrations (optional)
 * 2. Build session keys from the configured secret
 * 3. Create and configure the router
 */

use axum::Router;
use chrono::Duration;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// - Missing database: the server starts and data routes answer 503
/// - Migration failures: logged but don't prevent startup
pub async fn create_app(config: &ServerConfig) -> Router<()> {
    tracing::info!("Initializing Book Bazaar backend server");

    let db_pool = load_database(config).await;
    let state = AppState::new(db_pool, session_keys(config));

    build_app(state)
}

/// Router for an already assembled state
pub fn build_app(state: AppState) -> Router<()> {
    create_router(state)
}

/// Session keys described by the configuration
pub fn session_keys(config: &ServerConfig) -> SessionKeys {
    SessionKeys::new(&config.jwt_secret, Duration::hours(config.token_ttl_hours))
}
