//! Negotiation rows

use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool, Row};
use uuid::Uuid;

use super::decode_enum;
use crate::shared::marketplace::{Negotiation, NegotiationStatus, NegotiationSummary};

const NEGOTIATION_COLUMNS: &str = "n.id, n.listing_id, n.buyer_id, n.seller_id, n.original_price, \
     n.offered_price, n.counter_price, n.status, n.message, n.created_at, n.updated_at";

const SUMMARY_JOIN: &str = "FROM negotiations n \
     JOIN marketplace_listings l ON l.id = n.listing_id \
     JOIN books b ON b.id = l.book_id";

impl<'r> FromRow<'r, PgRow> for Negotiation {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Negotiation {
            id: row.try_get("id")?,
            listing_id: row.try_get("listing_id")?,
            buyer_id: row.try_get("buyer_id")?,
            seller_id: row.try_get("seller_id")?,
            original_price: row.try_get("original_price")?,
            offered_price: row.try_get("offered_price")?,
            counter_price: row.try_get("counter_price")?,
            status: decode_enum(row, "status", NegotiationStatus::from_str)?,
            message: row.try_get("message")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for NegotiationSummary {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(NegotiationSummary {
            negotiation: Negotiation::from_row(row)?,
            book_title: row.try_get("book_title")?,
            book_author: row.try_get("book_author")?,
            buyer_username: row.try_get("buyer_username")?,
            buyer_name: row.try_get("buyer_name")?,
            seller_username: row.try_get("seller_username")?,
            seller_name: row.try_get("seller_name")?,
        })
    }
}

/// Fields of a new offer
pub struct OfferRow<'a> {
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub original_price: Decimal,
    pub offered_price: Decimal,
    pub message: Option<&'a str>,
}

pub async fn insert_offer(pool: &PgPool, offer: OfferRow<'_>) -> Result<Negotiation, sqlx::Error> {
    sqlx::query_as::<_, Negotiation>(&format!(
        r#"
        INSERT INTO negotiations AS n (id, listing_id, buyer_id, seller_id, original_price, offered_price, message, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
        RETURNING {NEGOTIATION_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(offer.listing_id)
    .bind(offer.buyer_id)
    .bind(offer.seller_id)
    .bind(offer.original_price)
    .bind(offer.offered_price)
    .bind(offer.message)
    .fetch_one(pool)
    .await
}

/// Read a negotiation and hold its row lock until the transaction ends
pub async fn lock_negotiation(conn: &mut PgConnection, id: Uuid) -> Result<Option<Negotiation>, sqlx::Error> {
    sqlx::query_as::<_, Negotiation>(&format!(
        "SELECT {NEGOTIATION_COLUMNS} FROM negotiations n WHERE n.id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await
}

pub async fn set_counter(
    conn: &mut PgConnection,
    id: Uuid,
    counter_price: Decimal,
    message: Option<&str>,
) -> Result<Negotiation, sqlx::Error> {
    sqlx::query_as::<_, Negotiation>(&format!(
        r#"
        UPDATE negotiations AS n
        SET counter_price = $2,
            message = COALESCE($3, message),
            status = 'countered',
            updated_at = NOW()
        WHERE n.id = $1
        RETURNING {NEGOTIATION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(counter_price)
    .bind(message)
    .fetch_one(conn)
    .await
}

pub async fn set_status(
    conn: &mut PgConnection,
    id: Uuid,
    status: NegotiationStatus,
) -> Result<Negotiation, sqlx::Error> {
    sqlx::query_as::<_, Negotiation>(&format!(
        r#"
        UPDATE negotiations AS n
        SET status = $2, updated_at = NOW()
        WHERE n.id = $1
        RETURNING {NEGOTIATION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_one(conn)
    .await
}

/// Seller-side rows carry the buyer; buyer-side rows carry the seller
fn summary_select(counterpart: Counterpart) -> String {
    let (join_on, buyer, seller) = match counterpart {
        Counterpart::Buyer => (
            "u.id = n.buyer_id",
            "u.username AS buyer_username, u.full_name AS buyer_name",
            "NULL::TEXT AS seller_username, NULL::TEXT AS seller_name",
        ),
        Counterpart::Seller => (
            "u.id = n.seller_id",
            "NULL::TEXT AS buyer_username, NULL::TEXT AS buyer_name",
            "u.username AS seller_username, u.full_name AS seller_name",
        ),
    };
    format!(
        "SELECT {NEGOTIATION_COLUMNS}, b.title AS book_title, b.author AS book_author, \
         {buyer}, {seller} {SUMMARY_JOIN} JOIN users u ON {join_on}"
    )
}

#[derive(Clone, Copy)]
enum Counterpart {
    Buyer,
    Seller,
}

pub async fn for_listing(pool: &PgPool, listing_id: Uuid) -> Result<Vec<NegotiationSummary>, sqlx::Error> {
    sqlx::query_as::<_, NegotiationSummary>(&format!(
        "{} WHERE n.listing_id = $1 ORDER BY n.created_at DESC",
        summary_select(Counterpart::Buyer)
    ))
    .bind(listing_id)
    .fetch_all(pool)
    .await
}

pub async fn by_buyer(pool: &PgPool, buyer_id: Uuid) -> Result<Vec<NegotiationSummary>, sqlx::Error> {
    sqlx::query_as::<_, NegotiationSummary>(&format!(
        "{} WHERE n.buyer_id = $1 ORDER BY n.created_at DESC",
        summary_select(Counterpart::Seller)
    ))
    .bind(buyer_id)
    .fetch_all(pool)
    .await
}

pub async fn by_seller(pool: &PgPool, seller_id: Uuid) -> Result<Vec<NegotiationSummary>, sqlx::Error> {
    sqlx::query_as::<_, NegotiationSummary>(&format!(
        "{} WHERE n.seller_id = $1 ORDER BY n.created_at DESC",
        summary_select(Counterpart::Buyer)
    ))
    .bind(seller_id)
    .fetch_all(pool)
    .await
}
