//! Shared Error Types
//!
//! This module defines the error types raised by the domain layer: request
//! validation and status-transition rules for books and marketplace records.
//! They carry no HTTP knowledge; the backend maps them onto status codes.
//!
//! # Error Categories
//!
//! - `ValidationError` - A request field is missing or violates a business rule
//! - `InvalidTransition` - A status change the state machine does not allow
//!
//! # Usage
//!
//! ```rust
//! use book_bazaar::shared::error::SharedError;
//!
//! let error = SharedError::validation("price", "Price is required for sell listings");
//! assert_eq!(error.to_string(), "Price is required for sell listings");
//! ```
use thiserror::Error;

/// Errors produced by domain validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    ///
    /// Displays only the message so it can be handed to API clients as-is.
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Status change rejected by an entity's state machine
    #[error("Cannot change {entity} status from '{from}' to '{to}'")]
    InvalidTransition {
        /// Entity kind, e.g. "listing"
        entity: &'static str,
        /// Current status
        from: &'static str,
        /// Requested status
        to: &'static str,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new transition error
    pub fn transition(entity: &'static str, from: &'static str, to: &'static str) -> Self {
        Self::InvalidTransition { entity, from, to }
    }
}
