//! Marketplace Module
//!
//! Listings, exchange requests, negotiations and purchases.
//!
//! # Module Structure
//!
//! ```text
//! marketplace/
//! ├── mod.rs          - Module exports and documentation
//! ├── db/             - SQL and row decoding
//! ├── listings.rs     - Listing Manager
//! ├── exchange.rs     - Exchange Request Manager
//! ├── negotiations.rs - Negotiation Manager
//! ├── transactions.rs - Transaction Recorder
//! └── handlers.rs     - HTTP handlers
//! ```
//!
//! # Consistency
//!
//! Every operation that consumes or reprices a listing runs in one database
//! transaction, locks the listing row with `SELECT ... FOR UPDATE` and moves
//! it out of `active` with a conditional `UPDATE ... WHERE status = 'active'`.

pub mod db;
pub mod listings;
pub mod exchange;
pub mod negotiations;
pub mod transactions;
pub mod handlers;

pub use handlers::*;
