//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and layers
//! └── api_routes.rs   - `/api` endpoint table
//! ```
//!
//! # Route Groups
//!
//! - `/api/health` - Liveness check
//! - `/api/auth/*` - Registration, login, profile
//! - `/api/books*` - Book catalogue
//! - `/api/marketplace/*` - Listings, exchange requests, purchases
//! - `/api/negotiations*` - Price negotiation
//! - `/api/messages/*` - Direct messages
//! - `/api/profiles/*` - Public profiles and follows

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
