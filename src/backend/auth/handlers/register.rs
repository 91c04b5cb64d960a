/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Reject an email or username that is already taken (409)
 * 3. Hash the password with bcrypt
 * 4. Create the user and return a JWT token with the public profile
 */
use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::users::{create_user, find_user_by_email_or_username, NewUser};
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing fields, malformed email or short password
/// * `409 Conflict` - Email or username already registered
/// * `503 Service Unavailable` - If database is not configured
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let registration = request.validate()?;
    let pool = state.pool()?;

    tracing::info!("Register request for: {}", registration.email);

    if find_user_by_email_or_username(pool, &registration.email, &registration.username)
        .await?
        .is_some()
    {
        tracing::warn!("User already exists: {}", registration.email);
        return Err(BackendError::conflict(
            "User with this email or username already exists",
        ));
    }

    let password_hash = hash(&registration.password, DEFAULT_COST)?;

    // A concurrent registration can still trip the unique index; that maps to 409.
    let user = create_user(
        pool,
        NewUser {
            username: registration.username,
            email: registration.email,
            password_hash,
            full_name: registration.full_name,
            phone: registration.phone,
            address: registration.address,
        },
    )
    .await?;

    let token = state
        .sessions
        .create_token(user.id, &user.email, &user.username)?;

    tracing::info!("User registered successfully: {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}
