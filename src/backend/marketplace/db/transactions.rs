//! Transaction rows

use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool, Row};
use uuid::Uuid;

use super::decode_enum;
use crate::shared::marketplace::{Transaction, TransactionStatus, TransactionSummary};

const TRANSACTION_COLUMNS: &str = "t.id, t.listing_id, t.buyer_id, t.seller_id, t.amount, \
     t.status, t.created_at, t.completed_at";

const HISTORY_JOIN: &str = "FROM transactions t \
     JOIN marketplace_listings l ON l.id = t.listing_id \
     JOIN books b ON b.id = l.book_id";

impl<'r> FromRow<'r, PgRow> for Transaction {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Transaction {
            id: row.try_get("id")?,
            listing_id: row.try_get("listing_id")?,
            buyer_id: row.try_get("buyer_id")?,
            seller_id: row.try_get("seller_id")?,
            amount: row.try_get("amount")?,
            status: decode_enum(row, "status", TransactionStatus::from_str)?,
            created_at: row.try_get("created_at")?,
            completed_at: row.try_get("completed_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TransactionSummary {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(TransactionSummary {
            transaction: Transaction::from_row(row)?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            genre: row.try_get("genre")?,
            seller_name: row.try_get("seller_name")?,
            buyer_name: row.try_get("buyer_name")?,
        })
    }
}

/// Record a completed sale
pub async fn insert_completed(
    conn: &mut PgConnection,
    listing_id: Uuid,
    buyer_id: Uuid,
    seller_id: Uuid,
    amount: Decimal,
) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(&format!(
        r#"
        INSERT INTO transactions AS t (id, listing_id, buyer_id, seller_id, amount, status, completed_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING {TRANSACTION_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(listing_id)
    .bind(buyer_id)
    .bind(seller_id)
    .bind(amount)
    .bind(TransactionStatus::Completed.as_str())
    .fetch_one(conn)
    .await
}

pub async fn purchases(pool: &PgPool, buyer_id: Uuid) -> Result<Vec<TransactionSummary>, sqlx::Error> {
    sqlx::query_as::<_, TransactionSummary>(&format!(
        r#"
        SELECT {TRANSACTION_COLUMNS}, b.title, b.author, b.genre,
               u.username AS seller_name, NULL::TEXT AS buyer_name
        {HISTORY_JOIN}
        JOIN users u ON u.id = t.seller_id
        WHERE t.buyer_id = $1
        ORDER BY t.created_at DESC
        "#
    ))
    .bind(buyer_id)
    .fetch_all(pool)
    .await
}

pub async fn sales(pool: &PgPool, seller_id: Uuid) -> Result<Vec<TransactionSummary>, sqlx::Error> {
    sqlx::query_as::<_, TransactionSummary>(&format!(
        r#"
        SELECT {TRANSACTION_COLUMNS}, b.title, b.author, b.genre,
               NULL::TEXT AS seller_name, u.username AS buyer_name
        {HISTORY_JOIN}
        JOIN users u ON u.id = t.buyer_id
        WHERE t.seller_id = $1
        ORDER BY t.created_at DESC
        "#
    ))
    .bind(seller_id)
    .fetch_all(pool)
    .await
}
