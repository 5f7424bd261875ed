//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod podcast;

pub use podcast::{get_feed, podcastit};
