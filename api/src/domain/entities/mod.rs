//! Domain entities
//!
//! Pure domain models representing submitted entries and feeds.

pub mod entry;
pub mod feed;

pub use entry::Entry;
pub use feed::{FeedFormat, FeedMetadata, FeedName};
