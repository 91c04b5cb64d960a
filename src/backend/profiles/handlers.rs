//! Profile HTTP Handlers
//!
//! Profiles and follower lists are public. Editing your own profile and
//! following need a session.

use axum::{extract::State, Json};
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::books::{db as books_db, MessageResponse};
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::profile::{FollowStatus, ProfileUpdate, PublicProfile, UserCard};

/// GET /api/profiles/{username}
pub async fn get_public_profile(
    State(state): State<AppState>,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<PublicProfile>, BackendError> {
    let pool = state.pool()?;

    let user = db::public_user(pool, &username)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    let books = books_db::list_books_by_owner(pool, user.id).await?;
    let stats = db::stats(pool, user.id).await?;

    Ok(Json(PublicProfile {
        user,
        books,
        followers: stats.followers,
        following: stats.following,
        active_listings: stats.active_listings,
    }))
}

/// PUT /api/profiles/me
pub async fn update_my_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<MessageResponse>, BackendError> {
    let update = update.validate()?;
    let pool = state.pool()?;

    db::upsert_profile(pool, user.id(), &update).await?;
    tracing::info!("Public profile updated for user {}", user.id());

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

/// POST /api/profiles/follow/{user_id}
pub async fn follow_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(target): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    if target == user.id() {
        return Err(BackendError::validation("Cannot follow yourself"));
    }
    let pool = state.pool()?;

    if get_user_by_id(pool, target).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }
    db::follow(pool, user.id(), target).await?;
    tracing::info!("User {} follows {}", user.id(), target);

    Ok(Json(MessageResponse {
        message: "User followed successfully".to_string(),
    }))
}

/// DELETE /api/profiles/follow/{user_id}
pub async fn unfollow_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(target): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    let pool = state.pool()?;
    db::unfollow(pool, user.id(), target).await?;

    Ok(Json(MessageResponse {
        message: "User unfollowed successfully".to_string(),
    }))
}

/// GET /api/profiles/follow/check/{user_id}
pub async fn check_following(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(target): ApiPath<Uuid>,
) -> Result<Json<FollowStatus>, BackendError> {
    let pool = state.pool()?;
    let is_following = db::is_following(pool, user.id(), target).await?;
    Ok(Json(FollowStatus { is_following }))
}

/// GET /api/profiles/{user_id}/followers
pub async fn list_followers(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<UserCard>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(db::followers(pool, user_id).await?))
}

/// GET /api/profiles/{user_id}/following
pub async fn list_following(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<UserCard>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(db::following(pool, user_id).await?))
}
