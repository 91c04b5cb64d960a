//! Messaging Module
//!
//! Direct messages between users, grouped into conversations.

pub mod db;
pub mod handlers;

pub use handlers::*;
