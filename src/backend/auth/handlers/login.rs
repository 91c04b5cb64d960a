/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown users and wrong passwords get the same 401 message
 * - User passwords are never returned in responses
 */
use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::validate::non_blank;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Email or password missing
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let (Some(email), Some(password)) = (non_blank(request.email), request.password) else {
        return Err(BackendError::validation("Email and password are required"));
    };
    let email = email.trim().to_lowercase();
    let pool = state.pool()?;

    tracing::info!("Login request for: {}", email);

    let user = get_user_by_email(pool, &email).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", email);
        BackendError::unauthorized(INVALID_CREDENTIALS)
    })?;

    if !verify(&password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state
        .sessions
        .create_token(user.id, &user.email, &user.username)?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
