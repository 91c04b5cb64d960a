/**
 * Profile Handlers
 *
 * GET /api/auth/profile returns the authenticated user.
 * PUT /api/auth/profile updates contact details.
 */
use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{
    ProfileResponse, ProfileUpdateResponse, UpdateProfileRequest,
};
use crate::backend::auth::users::{get_user_by_id, update_profile as store_profile};
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::backend::server::state::AppState;

/// Get current user handler
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, BackendError> {
    let pool = state.pool()?;

    let user = get_user_by_id(pool, user.id())
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(ProfileResponse { user: user.into() }))
}

/// Update contact details of the current user
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdateResponse>, BackendError> {
    let request = request.validate()?;
    let pool = state.pool()?;

    let updated = store_profile(
        pool,
        user.id(),
        request.full_name.as_deref(),
        request.phone.as_deref(),
        request.address.as_deref(),
    )
    .await?
    .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("Profile updated for user {}", updated.id);

    Ok(Json(ProfileUpdateResponse {
        message: "Profile updated successfully".to_string(),
        user: updated.into(),
    }))
}
