//! Shared Module
//!
//! Domain types used by the HTTP layer and the database layer: books,
//! marketplace records, messages and profiles, their request/response
//! bodies, and the validation and state-transition rules that govern them.
//!
//! Nothing in here touches the network or the database, so every rule can
//! be unit tested in isolation.

/// Book catalogue types
pub mod book;

/// Listings, exchange requests, negotiations and transactions
pub mod marketplace;

/// Direct messages between users
pub mod messaging;

/// Public profiles and follows
pub mod profile;

/// Shared error types
pub mod error;

/// Field validators
pub mod validate;

pub use book::{Book, BookFields, BookPatch, CreateBookRequest};
pub use error::SharedError;
