//! Database-backed flows
//!
//! Compiled with `--features db-tests`; needs `DATABASE_URL` pointing at a
//! PostgreSQL the suite may migrate and write to.

mod accounts_test;
mod exchange_test;
mod listings_test;
mod purchase_test;
