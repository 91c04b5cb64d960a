//! Messaging HTTP Handlers
//!
//! Every route needs a session. A message is visible to its sender and its
//! recipient; only the recipient can mark it read.

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::books::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::marketplace::db::listings::find_listing;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::messaging::{
    Conversation, SendMessageRequest, SendMessageResponse, ThreadMessage, UnreadCount,
};

const MESSAGE_NOT_FOUND: &str = "Message not found";

/// GET /api/messages/conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Conversation>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(db::conversations(pool, user.id()).await?))
}

/// GET /api/messages/conversation/{user_id}
///
/// Reading a conversation marks the messages received in it as read. The
/// returned rows still show their state from before the read.
pub async fn get_conversation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(other_id): ApiPath<Uuid>,
) -> Result<Json<Vec<ThreadMessage>>, BackendError> {
    let pool = state.pool()?;
    let mut tx = pool.begin().await?;

    let messages = db::thread(&mut tx, user.id(), other_id).await?;
    let read = db::mark_thread_read(&mut tx, other_id, user.id()).await?;
    tx.commit().await?;

    if read > 0 {
        tracing::debug!("User {} read {} messages from {}", user.id(), read, other_id);
    }
    Ok(Json(messages))
}

/// POST /api/messages/send
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), BackendError> {
    let message = request.validate(user.id())?;
    let pool = state.pool()?;

    if get_user_by_id(pool, message.recipient_id).await?.is_none() {
        return Err(BackendError::not_found("Recipient not found"));
    }
    if let Some(listing_id) = message.listing_id {
        if find_listing(pool, listing_id).await?.is_none() {
            return Err(BackendError::not_found("Listing not found"));
        }
    }

    let data = db::insert_message(pool, user.id(), &message).await?;
    tracing::info!("Message {} sent from {} to {}", data.id, data.sender_id, data.recipient_id);

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            message: "Message sent successfully".to_string(),
            data,
        }),
    ))
}

/// GET /api/messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UnreadCount>, BackendError> {
    let pool = state.pool()?;
    let count = db::unread_count(pool, user.id()).await?;
    Ok(Json(UnreadCount { count }))
}

/// PUT /api/messages/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    let pool = state.pool()?;

    if !db::mark_read(pool, id, user.id()).await? {
        return Err(BackendError::not_found(MESSAGE_NOT_FOUND));
    }

    Ok(Json(MessageResponse {
        message: "Message marked as read".to_string(),
    }))
}

/// DELETE /api/messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    let pool = state.pool()?;

    if !db::delete_message(pool, id, user.id()).await? {
        return Err(BackendError::not_found(MESSAGE_NOT_FOUND));
    }

    tracing::info!("Message {} deleted by user {}", id, user.id());
    Ok(Json(MessageResponse {
        message: "Message deleted successfully".to_string(),
    }))
}
