//! Small field validators shared by the request types.

use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer};

use crate::shared::SharedError;

/// Money columns are NUMERIC(10,2): two decimals, eight integer digits
const MONEY_SCALE: u32 = 2;
const MONEY_LIMIT: i64 = 100_000_000;

/// Unwrap a required field or fail with `message`
pub fn required<T>(value: Option<T>, field: &str, message: &str) -> Result<T, SharedError> {
    value.ok_or_else(|| SharedError::validation(field, message))
}

/// Unwrap a required, non-blank string field (trimmed)
pub fn required_text(value: Option<String>, field: &str, message: &str) -> Result<String, SharedError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SharedError::validation(field, message)),
    }
}

/// Reject zero and negative amounts
pub fn positive(amount: Decimal, field: &str, message: &str) -> Result<Decimal, SharedError> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(SharedError::validation(field, message))
    }
}

/// A positive amount of money that the database stores exactly.
///
/// `label` starts the error message, e.g. "Offered price".
pub fn money(amount: Decimal, field: &str, label: &str) -> Result<Decimal, SharedError> {
    positive(amount, field, &format!("{label} must be greater than zero"))?;
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(SharedError::validation(
            field,
            format!("{label} must have at most two decimal places"),
        ));
    }
    if amount >= Decimal::from(MONEY_LIMIT) {
        return Err(SharedError::validation(
            field,
            format!("{label} must be less than {MONEY_LIMIT}"),
        ));
    }
    Ok(amount)
}

/// Reject text longer than its VARCHAR column
pub fn max_len(value: Option<&str>, field: &str, label: &str, max: usize) -> Result<(), SharedError> {
    match value {
        Some(v) if v.chars().count() > max => Err(SharedError::validation(
            field,
            format!("{label} must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}

/// Drop empty/whitespace-only optional strings
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Serde helper for query strings: an empty parameter (`?type=`) is absent
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => T::deserialize(value.into_deserializer())
            .map(Some)
            .map_err(|e: de::value::Error| <D::Error as de::Error>::custom(e)),
    }
}
