/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler and
 * marketplace operation. Errors convert into JSON responses of the form
 * `{"error": "..."}`.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Client-facing failures with an explicit status code:
 * - 400 validation failures and business-rule violations
 * - 401 missing or invalid credentials
 * - 403 authenticated but not allowed
 * - 404 missing resources (or ownership masked as missing)
 * - 409 duplicate accounts
 * - 503 database not configured
 *
 * ## Internal Errors
 *
 * Database, token and password hashing failures. These are logged with
 * their details and answered with a generic 500 message.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use book_bazaar::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Listing not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("{message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Domain validation or state-transition error
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JWT encoding error
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn validation(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 Forbidden
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 409 Conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// 503 Service Unavailable
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - `Database` - 409 for unique/foreign key violations, 500 otherwise
    /// - `Token`, `PasswordHash` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Database(err) => match constraint_code(err).as_deref() {
                Some(UNIQUE_VIOLATION) | Some(FOREIGN_KEY_VIOLATION) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Token(_) | Self::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to the client
    ///
    /// Internal failures never leak their details.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::Database(err) => match constraint_code(err).as_deref() {
                Some(UNIQUE_VIOLATION) => "Resource already exists".to_string(),
                Some(FOREIGN_KEY_VIOLATION) => {
                    "Resource is still referenced by other records".to_string()
                }
                _ => "Internal server error".to_string(),
            },
            _ => "Internal server error".to_string(),
        }
    }

    /// Whether this is a server-side fault worth logging at error level
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

fn constraint_code(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}
