//! Shared storage integration tests.
//!
//! Tests the ResponseStore interface against all implementations.
//! Each implementation module imports these test functions and runs them.

pub mod response_store_tests;
