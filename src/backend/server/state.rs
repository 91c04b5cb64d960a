/**
 * Application State Management
 *
 * This module defines the application state structure handed to every
 * handler through `State<AppState>`.
 *
 * # Architecture
 *
 * The `AppState` struct holds:
 * - The optional PostgreSQL pool (all marketplace data lives there)
 * - Session signing keys
 *
 * There is no other in-process mutable state. Handlers are stateless and
 * every mutation goes through the database.
 *
 * # Example
 *
 * ```rust,no_run
 * use book_bazaar::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let has_db = state.db_pool.is_some();
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::error::BackendError;

/// Application state shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if
    /// `DATABASE_URL` environment variable is not set). Handlers obtain it
    /// through [`AppState::pool`], which answers 503 in that case.
    pub db_pool: Option<PgPool>,

    /// Keys used to issue and verify session tokens
    pub sessions: Arc<SessionKeys>,
}

impl AppState {
    pub fn new(db_pool: Option<PgPool>, sessions: SessionKeys) -> Self {
        Self {
            db_pool,
            sessions: Arc::new(sessions),
        }
    }

    /// Borrow the pool or fail with 503
    pub fn pool(&self) -> Result<&PgPool, BackendError> {
        self.db_pool.as_ref().ok_or_else(|| {
            tracing::warn!("Database not configured");
            BackendError::unavailable("Database not configured")
        })
    }
}
