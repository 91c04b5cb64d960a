//! Database operations for the marketplace
//!
//! Statuses, listing types and conditions are stored as TEXT and decoded
//! through the enums' `from_str`. Functions that take a `&mut PgConnection`
//! are meant to run inside a transaction opened by the caller.

pub mod listings;
pub mod exchange;
pub mod negotiations;
pub mod transactions;

use sqlx::postgres::PgRow;
use sqlx::Row;

/// Decode a TEXT column into one of the marketplace enums
pub(crate) fn decode_enum<T>(
    row: &PgRow,
    column: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse(&raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("unexpected value '{raw}'").into(),
    })
}
