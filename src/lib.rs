//! Book Bazaar - Main Library
//!
//! A book marketplace backend: users catalogue their books, list them for
//! sale or exchange, negotiate prices and record purchases.
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types, state machines and request validation.
//!   No HTTP or database knowledge.
//! - **`backend`** - Axum server, PostgreSQL persistence, authentication
//!   and the marketplace managers.
//!
//! # Usage
//!
//! ```rust,no_run
//! use book_bazaar::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await;
//! // Serve with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation and illegal status changes
//! - `backend::BackendError` for everything a handler can return

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
