//! Property-based tests

mod marketplace_proptest;
mod session_proptest;
mod validation_proptest;
