//! Entry store port
//!
//! Durable, append-only record of submissions per feed name.
//! Implementations are provided by adapters (e.g., the CSV file log).

use async_trait::async_trait;

use crate::domain::entities::{Entry, FeedName};
use crate::error::DomainError;

/// Append-only log of entries, one log per feed name
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Append one entry to the end of a feed's log, creating the log if needed.
    ///
    /// Once this returns `Ok`, the entry is visible to every later `read_all`
    /// on the same feed.
    async fn append(&self, feed: &FeedName, entry: &Entry) -> Result<(), DomainError>;

    /// Read every entry of a feed in append order.
    ///
    /// A feed that was never appended to yields an empty vec.
    async fn read_all(&self, feed: &FeedName) -> Result<Vec<Entry>, DomainError>;
}
