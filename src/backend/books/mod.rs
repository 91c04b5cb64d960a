//! Book Catalogue Module
//!
//! Books owned by users. Listings and exchange offers point at these rows.

pub mod db;
pub mod handlers;

pub use handlers::*;
