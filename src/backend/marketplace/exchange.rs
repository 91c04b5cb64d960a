//! Exchange Request Manager
//!
//! A requester offers one of their books against an active exchange
//! listing. The listing's seller accepts or rejects; accepting consumes the
//! listing.

use sqlx::PgPool;
use uuid::Uuid;

use super::db::{exchange as db, listings as listing_db};
use crate::backend::auth::{AuthorizationPolicy, ResourceKind};
use crate::backend::books::db::get_owned_book;
use crate::backend::error::BackendError;
use crate::shared::marketplace::{
    ExchangeRequest, ExchangeRequestSummary, ExchangeStatus, ListingStatus, ListingType,
    NewExchangeRequest,
};

/// Offer a book against an exchange listing
pub async fn propose(
    pool: &PgPool,
    requester_id: Uuid,
    request: NewExchangeRequest,
) -> Result<ExchangeRequest, BackendError> {
    let listing = listing_db::find_listing(pool, request.listing_id)
        .await?
        .filter(|listing| listing.is_available(ListingType::Exchange))
        .ok_or_else(|| BackendError::not_found("Exchange listing not found or not available"))?;

    listing.ensure_not_seller(requester_id, "Cannot request an exchange for your own listing")?;

    if get_owned_book(pool, request.offered_book_id, requester_id).await?.is_none() {
        return Err(AuthorizationPolicy::not_found(ResourceKind::Book));
    }

    let created = db::insert_request(pool, requester_id, &request).await?;
    tracing::info!(
        "Exchange request {} created for listing {} by user {}",
        created.id,
        created.listing_id,
        requester_id
    );
    Ok(created)
}

/// Record the seller's decision on a request
///
/// Accepting flips the listing to `exchanged` in the same transaction. If the
/// listing was consumed meanwhile nothing is written.
pub async fn respond(
    pool: &PgPool,
    request_id: Uuid,
    seller_id: Uuid,
    decision: ExchangeStatus,
) -> Result<ExchangeRequest, BackendError> {
    let mut tx = pool.begin().await?;

    let current = db::lock_request(&mut tx, request_id)
        .await?
        .ok_or_else(|| AuthorizationPolicy::not_found(ResourceKind::ExchangeRequest))?;

    let listing = listing_db::lock_listing(&mut tx, current.listing_id)
        .await?
        .ok_or_else(|| AuthorizationPolicy::not_found(ResourceKind::ExchangeRequest))?;

    if listing.seller_id != seller_id {
        tracing::warn!("User {} tried to answer exchange request {}", seller_id, request_id);
        return Err(AuthorizationPolicy::ownership_denied(ResourceKind::ExchangeRequest));
    }

    current.status.check_transition(decision)?;

    if decision == ExchangeStatus::Accepted
        && !listing_db::close_active_listing(&mut tx, listing.id, ListingStatus::Exchanged).await?
    {
        return Err(BackendError::validation("Listing is no longer available"));
    }

    let updated = db::set_status(&mut tx, request_id, decision).await?;
    tx.commit().await?;

    tracing::info!("Exchange request {} is now {}", updated.id, updated.status.as_str());
    Ok(updated)
}

/// Requests against the seller's listings
pub async fn received(pool: &PgPool, seller_id: Uuid) -> Result<Vec<ExchangeRequestSummary>, BackendError> {
    Ok(db::received_by_seller(pool, seller_id).await?)
}

/// Requests the user has sent
pub async fn sent(pool: &PgPool, requester_id: Uuid) -> Result<Vec<ExchangeRequestSummary>, BackendError> {
    Ok(db::sent_by_requester(pool, requester_id).await?)
}
