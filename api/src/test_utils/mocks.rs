//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Entry, FeedName};
use crate::domain::ports::EntryStore;
use crate::error::DomainError;

// ============================================================================
// In-Memory Entry Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryEntryStore {
    feeds: Arc<RwLock<HashMap<FeedName, Vec<Entry>>>>,
    reads: AtomicUsize,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a feed with an entry for testing
    pub fn with_entry(self, feed: &FeedName, entry: Entry) -> Self {
        self.feeds
            .write()
            .unwrap()
            .entry(feed.clone())
            .or_default()
            .push(entry);
        self
    }

    /// Number of entries currently stored for a feed
    pub fn len(&self, feed: &FeedName) -> usize {
        self.feeds
            .read()
            .unwrap()
            .get(feed)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// How many times `read_all` has been called
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn append(&self, feed: &FeedName, entry: &Entry) -> Result<(), DomainError> {
        self.feeds
            .write()
            .unwrap()
            .entry(feed.clone())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn read_all(&self, feed: &FeedName) -> Result<Vec<Entry>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .feeds
            .read()
            .unwrap()
            .get(feed)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Failing Entry Store
// ============================================================================

/// Store whose every operation fails with a storage error
#[derive(Default)]
pub struct FailingEntryStore;

impl FailingEntryStore {
    fn io_error() -> DomainError {
        DomainError::StorageIo(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ))
    }
}

#[async_trait]
impl EntryStore for FailingEntryStore {
    async fn append(&self, _feed: &FeedName, _entry: &Entry) -> Result<(), DomainError> {
        Err(Self::io_error())
    }

    async fn read_all(&self, _feed: &FeedName) -> Result<Vec<Entry>, DomainError> {
        Err(Self::io_error())
    }
}
