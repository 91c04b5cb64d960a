//! Public Profiles Module
//!
//! Reader profiles by username and the follow graph between users.

pub mod db;
pub mod handlers;

pub use handlers::*;
