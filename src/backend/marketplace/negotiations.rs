//! Negotiation Manager
//!
//! Buyers propose a price on an active sell listing; the seller counters,
//! accepts or rejects. Accepting reprices the listing but leaves it active,
//! so the buyer still completes the purchase separately.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::db::{listings as listing_db, negotiations as db};
use crate::backend::auth::{AuthorizationPolicy, ResourceKind};
use crate::backend::error::BackendError;
use crate::shared::marketplace::{
    CounterOffer, ListingType, Negotiation, NegotiationStatus, NegotiationSummary, NewOffer,
};

/// Open a negotiation on a sell listing
pub async fn offer(pool: &PgPool, buyer_id: Uuid, offer: NewOffer) -> Result<Negotiation, BackendError> {
    let listing = listing_db::find_listing(pool, offer.listing_id)
        .await?
        .filter(|listing| listing.is_available(ListingType::Sell))
        .ok_or_else(|| BackendError::not_found("Listing not found or not available for negotiation"))?;

    listing.ensure_not_seller(buyer_id, "Cannot negotiate on your own listing")?;

    let negotiation = db::insert_offer(
        pool,
        db::OfferRow {
            listing_id: listing.id,
            buyer_id,
            seller_id: listing.seller_id,
            original_price: listing.sale_price()?,
            offered_price: offer.offered_price,
            message: offer.message.as_deref(),
        },
    )
    .await?;

    tracing::info!(
        "Offer {} of {} on listing {} by user {}",
        negotiation.id,
        negotiation.offered_price,
        listing.id,
        buyer_id
    );
    Ok(negotiation)
}

/// Seller proposes a different price
pub async fn counter(
    pool: &PgPool,
    negotiation_id: Uuid,
    seller_id: Uuid,
    counter: CounterOffer,
) -> Result<Negotiation, BackendError> {
    let mut tx = pool.begin().await?;

    let current = sellers_negotiation(&mut tx, negotiation_id, seller_id).await?;
    current.status.check_transition(NegotiationStatus::Countered)?;

    let updated = db::set_counter(
        &mut tx,
        negotiation_id,
        counter.counter_price,
        counter.message.as_deref(),
    )
    .await?;
    tx.commit().await?;

    tracing::info!("Negotiation {} countered at {}", updated.id, counter.counter_price);
    Ok(updated)
}

/// Seller accepts; the listing is repriced to the settlement price
pub async fn accept(pool: &PgPool, negotiation_id: Uuid, seller_id: Uuid) -> Result<Negotiation, BackendError> {
    let mut tx = pool.begin().await?;

    let current = sellers_negotiation(&mut tx, negotiation_id, seller_id).await?;
    current.status.check_transition(NegotiationStatus::Accepted)?;

    // Hold the listing row so a concurrent purchase waits for the new price.
    let listing = listing_db::lock_listing(&mut tx, current.listing_id).await?;
    let price = current.settlement_price();
    if listing.is_none() || !listing_db::reprice_active_listing(&mut tx, current.listing_id, price).await? {
        return Err(BackendError::validation("Listing is no longer available"));
    }

    let updated = db::set_status(&mut tx, negotiation_id, NegotiationStatus::Accepted).await?;
    tx.commit().await?;

    tracing::info!(
        "Negotiation {} accepted; listing {} repriced to {}",
        updated.id,
        updated.listing_id,
        price
    );
    Ok(updated)
}

/// Seller declines
pub async fn reject(pool: &PgPool, negotiation_id: Uuid, seller_id: Uuid) -> Result<Negotiation, BackendError> {
    let mut tx = pool.begin().await?;

    let current = sellers_negotiation(&mut tx, negotiation_id, seller_id).await?;
    current.status.check_transition(NegotiationStatus::Rejected)?;

    let updated = db::set_status(&mut tx, negotiation_id, NegotiationStatus::Rejected).await?;
    tx.commit().await?;

    tracing::info!("Negotiation {} rejected", updated.id);
    Ok(updated)
}

/// Offers on one of the seller's listings
pub async fn for_listing(
    pool: &PgPool,
    listing_id: Uuid,
    seller_id: Uuid,
) -> Result<Vec<NegotiationSummary>, BackendError> {
    let listing = listing_db::find_listing(pool, listing_id)
        .await?
        .ok_or_else(|| AuthorizationPolicy::not_found(ResourceKind::Listing))?;

    if listing.seller_id != seller_id {
        return Err(AuthorizationPolicy::ownership_denied(ResourceKind::Listing));
    }

    Ok(db::for_listing(pool, listing_id).await?)
}

/// Offers the buyer has made
pub async fn my_offers(pool: &PgPool, buyer_id: Uuid) -> Result<Vec<NegotiationSummary>, BackendError> {
    Ok(db::by_buyer(pool, buyer_id).await?)
}

/// Offers the seller has received across all listings
pub async fn received(pool: &PgPool, seller_id: Uuid) -> Result<Vec<NegotiationSummary>, BackendError> {
    Ok(db::by_seller(pool, seller_id).await?)
}

/// Lock a negotiation whose seller must be `seller_id`
async fn sellers_negotiation(
    conn: &mut PgConnection,
    negotiation_id: Uuid,
    seller_id: Uuid,
) -> Result<Negotiation, BackendError> {
    let negotiation = db::lock_negotiation(conn, negotiation_id)
        .await?
        .ok_or_else(|| AuthorizationPolicy::not_found(ResourceKind::Negotiation))?;

    if negotiation.seller_id != seller_id {
        return Err(AuthorizationPolicy::ownership_denied(ResourceKind::Negotiation));
    }
    Ok(negotiation)
}
