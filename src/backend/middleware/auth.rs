/**
 * Authentication Extractor
 *
 * Protected handlers take an [`AuthUser`] argument. The extractor reads the
 * JWT from the `Authorization: Bearer <token>` header, verifies it and,
 * when a database is configured, checks that the user still exists.
 *
 * Returns 401 Unauthorized if the token is missing or invalid.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const TOKEN_REQUIRED: &str = "Access token required";
const TOKEN_INVALID: &str = "Invalid or expired token";

/// Axum extractor for the authenticated user.
///
/// Only the id is trusted; username and email are read from the users table
/// by the handlers that need them.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub Uuid);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

/// Pull the bearer token out of the headers
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized(TOKEN_REQUIRED)
        })?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            BackendError::unauthorized(TOKEN_REQUIRED)
        })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = state.sessions.verify_token(token).map_err(|e| {
            tracing::warn!("Invalid token: {:?}", e);
            BackendError::unauthorized(TOKEN_INVALID)
        })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!("Invalid user ID in token: {:?}", e);
            BackendError::unauthorized(TOKEN_INVALID)
        })?;

        if let Some(pool) = &state.db_pool {
            verify_user_exists(pool, user_id).await?;
        }

        Ok(AuthUser(user_id))
    }
}

/// Verify user exists in database
async fn verify_user_exists(pool: &PgPool, user_id: Uuid) -> Result<(), BackendError> {
    match get_user_by_id(pool, user_id).await? {
        Some(_) => Ok(()),
        None => {
            tracing::warn!("Token for unknown user {}", user_id);
            Err(BackendError::unauthorized(TOKEN_INVALID))
        }
    }
}
