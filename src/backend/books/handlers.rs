//! Book Catalogue HTTP Handlers
//!
//! Reads are public. Creating, editing and deleting need a session, and a
//! book that belongs to someone else is reported as missing.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::db;
use crate::backend::auth::{AuthorizationPolicy, ResourceKind};
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::{Book, BookPatch, CreateBookRequest};

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/books
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(db::list_books(pool).await?))
}

/// GET /api/books/mine
pub async fn list_my_books(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Book>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(db::list_books_by_owner(pool, user.id()).await?))
}

/// GET /api/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Book>, BackendError> {
    let pool = state.pool()?;
    db::get_book(pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found("Book not found"))
}

/// POST /api/books
pub async fn create_book(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), BackendError> {
    let fields = request.validate()?;
    let pool = state.pool()?;

    let book = db::create_book(pool, user.id(), fields).await?;
    tracing::info!("Book {} added by user {}", book.id, user.id());

    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /api/books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<BookPatch>,
) -> Result<Json<Book>, BackendError> {
    let patch = patch.validate()?;
    let pool = state.pool()?;

    let book = db::update_book(pool, id, user.id(), &patch)
        .await?
        .ok_or_else(|| AuthorizationPolicy::ownership_denied(ResourceKind::Book))?;

    tracing::info!("Book {} updated by user {}", book.id, user.id());
    Ok(Json(book))
}

/// DELETE /api/books/{id}
///
/// A book whose listing was sold stays: the sale record still points at it.
pub async fn delete_book(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    let pool = state.pool()?;
    let mut tx = pool.begin().await?;

    if db::get_owned_book(&mut *tx, id, user.id()).await?.is_none() {
        return Err(AuthorizationPolicy::ownership_denied(ResourceKind::Book));
    }
    if db::has_sales(&mut *tx, id).await? {
        return Err(BackendError::conflict(
            "Cannot delete a book with recorded transactions",
        ));
    }
    db::delete_book(&mut *tx, id, user.id()).await?;
    tx.commit().await?;

    tracing::info!("Book {} deleted by user {}", id, user.id());
    Ok(Json(MessageResponse {
        message: "Book deleted successfully".to_string(),
    }))
}
