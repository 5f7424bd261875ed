//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory store keeps the same ordering guarantees as the file log and
//! counts reads, so service tests can assert when storage was never touched.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
