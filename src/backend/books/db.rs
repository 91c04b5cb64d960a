//! Database operations for the book catalogue

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor, PgPool, Row};
use uuid::Uuid;

use crate::shared::{Book, BookFields, BookPatch};

const BOOK_COLUMNS: &str = "id, user_id, title, author, price, isbn, genre, publication_year, \
                            publisher, pages, description, created_at";

impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Book {
            id: row.try_get("id")?,
            owner_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            price: row.try_get("price")?,
            isbn: row.try_get("isbn")?,
            genre: row.try_get("genre")?,
            publication_year: row.try_get("publication_year")?,
            publisher: row.try_get("publisher")?,
            pages: row.try_get("pages")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Insert a book owned by `owner_id`
pub async fn create_book(pool: &PgPool, owner_id: Uuid, fields: BookFields) -> Result<Book, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!(
        r#"
        INSERT INTO books (id, user_id, title, author, price, isbn, genre, publication_year, publisher, pages, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {BOOK_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(&fields.title)
    .bind(&fields.author)
    .bind(fields.price)
    .bind(&fields.isbn)
    .bind(&fields.genre)
    .bind(fields.publication_year)
    .bind(&fields.publisher)
    .bind(fields.pages)
    .bind(&fields.description)
    .fetch_one(pool)
    .await
}

/// All books, newest first
pub async fn list_books(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!(
        "SELECT {BOOK_COLUMNS} FROM books ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Books owned by one user, newest first
pub async fn list_books_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!(
        "SELECT {BOOK_COLUMNS} FROM books WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn get_book(pool: &PgPool, id: Uuid) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// A book only if `owner_id` owns it
pub async fn get_owned_book<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    owner_id: Uuid,
) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!(
        "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(executor)
    .await
}

/// Apply a patch to an owned book; `None` if the book is absent or foreign
pub async fn update_book(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    patch: &BookPatch,
) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!(
        r#"
        UPDATE books
        SET title = COALESCE($3, title),
            author = COALESCE($4, author),
            price = COALESCE($5, price),
            isbn = COALESCE($6, isbn),
            genre = COALESCE($7, genre),
            publication_year = COALESCE($8, publication_year),
            publisher = COALESCE($9, publisher),
            pages = COALESCE($10, pages),
            description = COALESCE($11, description)
        WHERE id = $1 AND user_id = $2
        RETURNING {BOOK_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(owner_id)
    .bind(patch.title.as_deref().map(str::trim))
    .bind(patch.author.as_deref().map(str::trim))
    .bind(patch.price)
    .bind(&patch.isbn)
    .bind(&patch.genre)
    .bind(patch.publication_year)
    .bind(&patch.publisher)
    .bind(patch.pages)
    .bind(&patch.description)
    .fetch_optional(pool)
    .await
}

/// Whether any listing of this book has been sold
pub async fn has_sales<'e>(executor: impl PgExecutor<'e>, book_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT EXISTS(
             SELECT 1 FROM transactions t
             JOIN marketplace_listings l ON l.id = t.listing_id
             WHERE l.book_id = $1
         ) AS sold",
    )
    .bind(book_id)
    .fetch_one(executor)
    .await?;

    row.try_get("sold")
}

/// Delete an owned book; returns whether a row was removed
pub async fn delete_book<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    owner_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}

