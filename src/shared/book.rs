//! Book Data Structure
//!
//! A book in a user's catalogue. Listings and exchange offers reference books.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::validate::{max_len, money, non_blank, required, required_text};
use crate::shared::SharedError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub author: String,
    pub price: Decimal,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub publication_year: Option<i32>,
    pub publisher: Option<String>,
    pub pages: Option<i32>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/books`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<Decimal>,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub publication_year: Option<i32>,
    pub publisher: Option<String>,
    pub pages: Option<i32>,
    pub description: Option<String>,
}

/// Validated catalogue fields, used for inserts and full updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub price: Decimal,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub publication_year: Option<i32>,
    pub publisher: Option<String>,
    pub pages: Option<i32>,
    pub description: Option<String>,
}

const PRICE_MESSAGE: &str = "Title, author and a positive price are required";

/// Column widths of the books table
const TITLE_MAX: usize = 255;
const ISBN_MAX: usize = 20;
const GENRE_MAX: usize = 100;

impl CreateBookRequest {
    pub fn validate(self) -> Result<BookFields, SharedError> {
        let title = required_text(self.title, "title", PRICE_MESSAGE)?;
        let author = required_text(self.author, "author", PRICE_MESSAGE)?;
        let price = money(required(self.price, "price", PRICE_MESSAGE)?, "price", "Price")?;
        check_pages(self.pages)?;
        check_lengths(
            Some(&title),
            Some(&author),
            self.isbn.as_deref(),
            self.genre.as_deref(),
            self.publisher.as_deref(),
        )?;
        Ok(BookFields {
            title,
            author,
            price,
            isbn: non_blank(self.isbn),
            genre: non_blank(self.genre),
            publication_year: self.publication_year,
            publisher: non_blank(self.publisher),
            pages: self.pages,
            description: non_blank(self.description),
        })
    }
}

/// Body of `PUT /api/books/{id}`; absent fields are unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<Decimal>,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub publication_year: Option<i32>,
    pub publisher: Option<String>,
    pub pages: Option<i32>,
    pub description: Option<String>,
}

impl BookPatch {
    pub fn validate(self) -> Result<Self, SharedError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(SharedError::validation("title", "Title cannot be empty"));
        }
        if self.author.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err(SharedError::validation("author", "Author cannot be empty"));
        }
        if let Some(price) = self.price {
            money(price, "price", "Price")?;
        }
        check_pages(self.pages)?;
        check_lengths(
            self.title.as_deref(),
            self.author.as_deref(),
            self.isbn.as_deref(),
            self.genre.as_deref(),
            self.publisher.as_deref(),
        )?;
        Ok(self)
    }
}

fn check_pages(pages: Option<i32>) -> Result<(), SharedError> {
    match pages {
        Some(p) if p <= 0 => Err(SharedError::validation("pages", "Pages must be a positive number")),
        _ => Ok(()),
    }
}

fn check_lengths(
    title: Option<&str>,
    author: Option<&str>,
    isbn: Option<&str>,
    genre: Option<&str>,
    publisher: Option<&str>,
) -> Result<(), SharedError> {
    max_len(title, "title", "Title", TITLE_MAX)?;
    max_len(author, "author", "Author", TITLE_MAX)?;
    max_len(isbn, "isbn", "ISBN", ISBN_MAX)?;
    max_len(genre, "genre", "Genre", GENRE_MAX)?;
    max_len(publisher, "publisher", "Publisher", TITLE_MAX)
}
