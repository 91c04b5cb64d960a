//! Listing Manager
//!
//! Sellers create listings for books they own, edit or withdraw them, and
//! anyone can browse the active ones.

use sqlx::PgPool;
use uuid::Uuid;

use super::db::listings as db;
use crate::backend::auth::{AuthorizationPolicy, ResourceKind};
use crate::backend::books::db::get_owned_book;
use crate::backend::error::BackendError;
use crate::shared::marketplace::{Listing, ListingFilters, ListingPatch, ListingSummary, NewListing};

/// Publish a listing for one of the seller's books
pub async fn create(pool: &PgPool, seller_id: Uuid, listing: NewListing) -> Result<Listing, BackendError> {
    if get_owned_book(pool, listing.book_id, seller_id).await?.is_none() {
        tracing::warn!("User {} tried to list book {} they do not own", seller_id, listing.book_id);
        return Err(AuthorizationPolicy::not_found(ResourceKind::Book));
    }

    let created = db::insert_listing(pool, seller_id, &listing).await?;
    tracing::info!(
        "Listing {} created ({}) for book {}",
        created.id,
        created.listing_type.as_str(),
        created.book_id
    );
    Ok(created)
}

/// Apply a seller's patch
pub async fn update(
    pool: &PgPool,
    listing_id: Uuid,
    seller_id: Uuid,
    patch: ListingPatch,
) -> Result<Listing, BackendError> {
    let mut tx = pool.begin().await?;

    let current = owned_listing(&mut tx, listing_id, seller_id).await?;
    current.check_patch(&patch)?;

    let updated = db::apply_patch(&mut tx, listing_id, &patch).await?;
    tx.commit().await?;

    tracing::info!("Listing {} updated (status {})", updated.id, updated.status.as_str());
    Ok(updated)
}

/// Remove a listing that has never been sold
pub async fn delete(pool: &PgPool, listing_id: Uuid, seller_id: Uuid) -> Result<(), BackendError> {
    let mut tx = pool.begin().await?;

    owned_listing(&mut tx, listing_id, seller_id).await?;
    if db::has_transactions(&mut tx, listing_id).await? {
        return Err(BackendError::conflict(
            "Cannot delete a listing with recorded transactions",
        ));
    }

    db::delete_listing(&mut tx, listing_id).await?;
    tx.commit().await?;

    tracing::info!("Listing {} deleted by user {}", listing_id, seller_id);
    Ok(())
}

/// Active listings matching the filters, newest first
pub async fn list(pool: &PgPool, filters: ListingFilters) -> Result<Vec<ListingSummary>, BackendError> {
    let filters = filters.normalized();
    Ok(db::search_active(pool, &filters).await?)
}

/// All of a seller's listings, newest first
pub async fn list_mine(pool: &PgPool, seller_id: Uuid) -> Result<Vec<ListingSummary>, BackendError> {
    Ok(db::listings_by_seller(pool, seller_id).await?)
}

/// Lock a listing that must belong to `seller_id`
async fn owned_listing(
    conn: &mut sqlx::PgConnection,
    listing_id: Uuid,
    seller_id: Uuid,
) -> Result<Listing, BackendError> {
    let listing = db::lock_listing(conn, listing_id)
        .await?
        .ok_or_else(|| AuthorizationPolicy::not_found(ResourceKind::Listing))?;

    if listing.seller_id != seller_id {
        return Err(AuthorizationPolicy::ownership_denied(ResourceKind::Listing));
    }
    Ok(listing)
}
