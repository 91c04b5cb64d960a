//! Listing rows

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use super::decode_enum;
use crate::shared::marketplace::{
    Condition, Listing, ListingFilters, ListingPatch, ListingStatus, ListingSummary, ListingType,
    NewListing,
};

pub(crate) const LISTING_COLUMNS: &str = "l.id, l.book_id, l.user_id AS seller_id, l.listing_type, \
     l.price, l.condition, l.status, l.description, l.created_at, l.updated_at";

const SUMMARY_JOIN: &str = "FROM marketplace_listings l \
     JOIN books b ON b.id = l.book_id \
     JOIN users u ON u.id = l.user_id";

impl<'r> FromRow<'r, PgRow> for Listing {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Listing {
            id: row.try_get("id")?,
            book_id: row.try_get("book_id")?,
            seller_id: row.try_get("seller_id")?,
            listing_type: decode_enum(row, "listing_type", ListingType::from_str)?,
            price: row.try_get("price")?,
            condition: decode_enum(row, "condition", Condition::from_str)?,
            status: decode_enum(row, "status", ListingStatus::from_str)?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ListingSummary {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ListingSummary {
            listing: Listing::from_row(row)?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            genre: row.try_get("genre")?,
            pages: row.try_get("pages")?,
            isbn: row.try_get("isbn")?,
            seller_name: row.try_get("seller_name")?,
        })
    }
}

fn summary_select() -> String {
    format!(
        "SELECT {LISTING_COLUMNS}, b.title, b.author, b.genre, b.pages, b.isbn, \
         u.username AS seller_name {SUMMARY_JOIN}"
    )
}

pub async fn insert_listing(
    pool: &PgPool,
    seller_id: Uuid,
    listing: &NewListing,
) -> Result<Listing, sqlx::Error> {
    sqlx::query_as::<_, Listing>(&format!(
        r#"
        INSERT INTO marketplace_listings AS l (id, user_id, book_id, listing_type, price, condition, description, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'active')
        RETURNING {LISTING_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(seller_id)
    .bind(listing.book_id)
    .bind(listing.listing_type.as_str())
    .bind(listing.price)
    .bind(listing.condition.as_str())
    .bind(&listing.description)
    .fetch_one(pool)
    .await
}

pub async fn find_listing<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<Listing>, sqlx::Error> {
    sqlx::query_as::<_, Listing>(&format!(
        "SELECT {LISTING_COLUMNS} FROM marketplace_listings l WHERE l.id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Read a listing and hold its row lock until the transaction ends
pub async fn lock_listing(conn: &mut PgConnection, id: Uuid) -> Result<Option<Listing>, sqlx::Error> {
    sqlx::query_as::<_, Listing>(&format!(
        "SELECT {LISTING_COLUMNS} FROM marketplace_listings l WHERE l.id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await
}

/// Move an active listing to `next`.
///
/// Returns `false` when the listing is no longer active, so two buyers (or
/// a buyer and an exchange) can never both consume it.
pub async fn close_active_listing(
    conn: &mut PgConnection,
    id: Uuid,
    next: ListingStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE marketplace_listings SET status = $2, updated_at = NOW() \
         WHERE id = $1 AND status = 'active'",
    )
    .bind(id)
    .bind(next.as_str())
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Overwrite the price of an active listing; `false` if it is no longer active
pub async fn reprice_active_listing(
    conn: &mut PgConnection,
    id: Uuid,
    price: rust_decimal::Decimal,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE marketplace_listings SET price = $2, updated_at = NOW() \
         WHERE id = $1 AND status = 'active'",
    )
    .bind(id)
    .bind(price)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn apply_patch(
    conn: &mut PgConnection,
    id: Uuid,
    patch: &ListingPatch,
) -> Result<Listing, sqlx::Error> {
    sqlx::query_as::<_, Listing>(&format!(
        r#"
        UPDATE marketplace_listings AS l
        SET price = COALESCE($2, price),
            condition = COALESCE($3, condition),
            description = COALESCE($4, description),
            status = COALESCE($5, status),
            updated_at = NOW()
        WHERE l.id = $1
        RETURNING {LISTING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(patch.price)
    .bind(patch.condition.map(|c| c.as_str()))
    .bind(&patch.description)
    .bind(patch.status.map(|s| s.as_str()))
    .fetch_one(conn)
    .await
}

pub async fn has_transactions(conn: &mut PgConnection, listing_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM transactions WHERE listing_id = $1) AS sold")
        .bind(listing_id)
        .fetch_one(conn)
        .await?;

    row.try_get("sold")
}

pub async fn delete_listing(conn: &mut PgConnection, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM marketplace_listings WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Active listings matching every filter that is set, newest first
pub async fn search_active(
    pool: &PgPool,
    filters: &ListingFilters,
) -> Result<Vec<ListingSummary>, sqlx::Error> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new(summary_select());
    query.push(" WHERE l.status = 'active'");

    if let Some(listing_type) = filters.listing_type {
        query.push(" AND l.listing_type = ").push_bind(listing_type.as_str());
    }
    if let Some(condition) = filters.condition {
        query.push(" AND l.condition = ").push_bind(condition.as_str());
    }
    if let Some(max_price) = filters.max_price {
        query.push(" AND l.price <= ").push_bind(max_price);
    }
    if let Some(genre) = &filters.genre {
        query.push(" AND b.genre ILIKE ").push_bind(format!("%{genre}%"));
    }
    query.push(" ORDER BY l.created_at DESC");

    query.build_query_as::<ListingSummary>().fetch_all(pool).await
}

/// Every listing of one seller in any status, newest first
pub async fn listings_by_seller(pool: &PgPool, seller_id: Uuid) -> Result<Vec<ListingSummary>, sqlx::Error> {
    sqlx::query_as::<_, ListingSummary>(&format!(
        "{} WHERE l.user_id = $1 ORDER BY l.created_at DESC",
        summary_select()
    ))
    .bind(seller_id)
    .fetch_all(pool)
    .await
}
