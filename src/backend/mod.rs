//! Backend Module
//!
//! The Axum HTTP server for the book marketplace.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route table and router layers
//! - **`auth`** - Accounts, JWT sessions, ownership policy
//! - **`middleware`** - Bearer token extractor
//! - **`books`** - Book catalogue
//! - **`marketplace`** - Listings, exchange requests, negotiations, purchases
//! - **`messaging`** - Direct messages and conversations
//! - **`profiles`** - Public profiles and follows
//! - **`error`** - Backend error type and its JSON response
//!
//! # State Management
//!
//! All data lives in PostgreSQL. `AppState` only carries the pool and the
//! session keys, both cheap to clone into every handler.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; errors render as
//! `{"error": "..."}` with the matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Book catalogue
pub mod books;

/// Marketplace managers and handlers
pub mod marketplace;

/// Direct messages
pub mod messaging;

/// Public profiles and follows
pub mod profiles;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{build_app, create_app, AppState, ServerConfig};
