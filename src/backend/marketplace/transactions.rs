//! Transaction Recorder
//!
//! Buying an active sell listing marks it sold and records the sale in one
//! database transaction. The listing row is locked first, so of two
//! concurrent purchases exactly one succeeds.

use sqlx::PgPool;
use uuid::Uuid;

use super::db::{listings as listing_db, transactions as db};
use crate::backend::error::BackendError;
use crate::shared::marketplace::{ListingStatus, ListingType, Transaction, TransactionSummary};

const NOT_PURCHASABLE: &str = "Listing not found or not available for purchase";

/// Buy a listing at its current price
pub async fn purchase(pool: &PgPool, buyer_id: Uuid, listing_id: Uuid) -> Result<Transaction, BackendError> {
    let mut tx = pool.begin().await?;

    let listing = listing_db::lock_listing(&mut tx, listing_id)
        .await?
        .filter(|listing| listing.is_available(ListingType::Sell))
        .ok_or_else(|| BackendError::not_found(NOT_PURCHASABLE))?;

    listing.ensure_not_seller(buyer_id, "Cannot purchase your own listing")?;
    let amount = listing.sale_price()?;

    if !listing_db::close_active_listing(&mut tx, listing.id, ListingStatus::Sold).await? {
        return Err(BackendError::not_found(NOT_PURCHASABLE));
    }

    let transaction = db::insert_completed(&mut tx, listing.id, buyer_id, listing.seller_id, amount).await?;
    tx.commit().await?;

    tracing::info!(
        "Listing {} sold to user {} for {} (transaction {})",
        listing.id,
        buyer_id,
        amount,
        transaction.id
    );
    Ok(transaction)
}

/// The buyer's purchase history
pub async fn purchases(pool: &PgPool, buyer_id: Uuid) -> Result<Vec<TransactionSummary>, BackendError> {
    Ok(db::purchases(pool, buyer_id).await?)
}

/// The seller's sales history
pub async fn sales(pool: &PgPool, seller_id: Uuid) -> Result<Vec<TransactionSummary>, BackendError> {
    Ok(db::sales(pool, seller_id).await?)
}
