//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`auth`** - Bearer token extractor for protected routes
//! - **`extract`** - `Json`, `Path` and `Query` with JSON error bodies
//!
//! # Example
//!
//! ```rust,no_run
//! use book_bazaar::backend::middleware::AuthUser;
//!
//! async fn handler(user: AuthUser) -> String {
//!     user.id().to_string()
//! }
//! ```

pub mod auth;
pub mod extract;

pub use auth::AuthUser;
pub use extract::{ApiJson, ApiPath, ApiQuery};
