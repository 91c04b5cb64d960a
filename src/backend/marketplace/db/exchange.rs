//! Exchange request rows

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool, Row};
use uuid::Uuid;

use super::decode_enum;
use crate::shared::marketplace::{
    ExchangeRequest, ExchangeRequestSummary, ExchangeStatus, NewExchangeRequest,
};

const REQUEST_COLUMNS: &str = "er.id, er.listing_id, er.requester_id, er.offered_book_id, \
     er.status, er.message, er.created_at, er.updated_at";

const SUMMARY_JOIN: &str = "FROM exchange_requests er \
     JOIN marketplace_listings l ON l.id = er.listing_id \
     JOIN books lb ON lb.id = l.book_id \
     JOIN books ob ON ob.id = er.offered_book_id";

impl<'r> FromRow<'r, PgRow> for ExchangeRequest {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ExchangeRequest {
            id: row.try_get("id")?,
            listing_id: row.try_get("listing_id")?,
            requester_id: row.try_get("requester_id")?,
            offered_book_id: row.try_get("offered_book_id")?,
            status: decode_enum(row, "status", ExchangeStatus::from_str)?,
            message: row.try_get("message")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ExchangeRequestSummary {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ExchangeRequestSummary {
            request: ExchangeRequest::from_row(row)?,
            listing_book_title: row.try_get("listing_book_title")?,
            offered_book_title: row.try_get("offered_book_title")?,
            offered_book_author: row.try_get("offered_book_author")?,
            requester_name: row.try_get("requester_name")?,
            seller_name: row.try_get("seller_name")?,
        })
    }
}

pub async fn insert_request(
    pool: &PgPool,
    requester_id: Uuid,
    request: &NewExchangeRequest,
) -> Result<ExchangeRequest, sqlx::Error> {
    sqlx::query_as::<_, ExchangeRequest>(&format!(
        r#"
        INSERT INTO exchange_requests AS er (id, listing_id, requester_id, offered_book_id, message, status)
        VALUES ($1, $2, $3, $4, $5, 'pending')
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(request.listing_id)
    .bind(requester_id)
    .bind(request.offered_book_id)
    .bind(&request.message)
    .fetch_one(pool)
    .await
}

/// Read a request and hold its row lock until the transaction ends
pub async fn lock_request(conn: &mut PgConnection, id: Uuid) -> Result<Option<ExchangeRequest>, sqlx::Error> {
    sqlx::query_as::<_, ExchangeRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM exchange_requests er WHERE er.id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await
}

pub async fn set_status(
    conn: &mut PgConnection,
    id: Uuid,
    status: ExchangeStatus,
) -> Result<ExchangeRequest, sqlx::Error> {
    sqlx::query_as::<_, ExchangeRequest>(&format!(
        r#"
        UPDATE exchange_requests AS er
        SET status = $2, updated_at = NOW()
        WHERE er.id = $1
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_one(conn)
    .await
}

/// Requests made against the seller's listings, newest first
pub async fn received_by_seller(
    pool: &PgPool,
    seller_id: Uuid,
) -> Result<Vec<ExchangeRequestSummary>, sqlx::Error> {
    sqlx::query_as::<_, ExchangeRequestSummary>(&format!(
        r#"
        SELECT {REQUEST_COLUMNS},
               lb.title AS listing_book_title,
               ob.title AS offered_book_title,
               ob.author AS offered_book_author,
               u.username AS requester_name,
               NULL::TEXT AS seller_name
        {SUMMARY_JOIN}
        JOIN users u ON u.id = er.requester_id
        WHERE l.user_id = $1
        ORDER BY er.created_at DESC
        "#
    ))
    .bind(seller_id)
    .fetch_all(pool)
    .await
}

/// Requests the user has made, newest first
pub async fn sent_by_requester(
    pool: &PgPool,
    requester_id: Uuid,
) -> Result<Vec<ExchangeRequestSummary>, sqlx::Error> {
    sqlx::query_as::<_, ExchangeRequestSummary>(&format!(
        r#"
        SELECT {REQUEST_COLUMNS},
               lb.title AS listing_book_title,
               ob.title AS offered_book_title,
               ob.author AS offered_book_author,
               NULL::TEXT AS requester_name,
               u.username AS seller_name
        {SUMMARY_JOIN}
        JOIN users u ON u.id = l.user_id
        WHERE er.requester_id = $1
        ORDER BY er.created_at DESC
        "#
    ))
    .bind(requester_id)
    .fetch_all(pool)
    .await
}
