//! Integration tests against the real router

#[cfg(feature = "db-tests")]
mod database;
