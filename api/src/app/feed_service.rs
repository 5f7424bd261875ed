//! Feed service
//!
//! The two use cases of the API: submit a URL to a feed, and render a feed.

use std::sync::Arc;

use chrono::Utc;

use crate::config::Config;
use crate::domain::entities::{Entry, FeedFormat, FeedMetadata, FeedName};
use crate::domain::ports::EntryStore;
use crate::error::AppError;
use crate::feed;

/// Static fields shared by every rendered feed
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub title: String,
    pub description: String,
    pub base_url: String,
    pub logo_url: Option<String>,
}

impl From<&Config> for FeedSettings {
    fn from(config: &Config) -> Self {
        Self {
            title: config.feed_title.clone(),
            description: config.feed_description.clone(),
            base_url: config.base_url.clone(),
            logo_url: config.logo_url.clone(),
        }
    }
}

/// A rendered feed document
#[derive(Debug, Clone)]
pub struct RenderedFeed {
    pub format: FeedFormat,
    pub body: Vec<u8>,
}

/// Service for submitting entries and rendering feeds
pub struct FeedService<S>
where
    S: EntryStore,
{
    store: Arc<S>,
    settings: FeedSettings,
}

impl<S> FeedService<S>
where
    S: EntryStore,
{
    pub fn new(store: Arc<S>, settings: FeedSettings) -> Self {
        Self { store, settings }
    }

    /// Validate a submission and append it to the feed
    pub async fn submit(
        &self,
        feed: &FeedName,
        url: &str,
        title: Option<&str>,
    ) -> Result<Entry, AppError> {
        let entry = Entry::new(url, title, Utc::now())?;
        self.store.append(feed, &entry).await?;

        tracing::info!(feed = %feed, url = entry.url(), title = entry.title(), "Added entry to feed");
        Ok(entry)
    }

    /// Render a feed in the requested format.
    ///
    /// The format is checked before the log is read, so an unsupported
    /// `feed_type` never touches storage.
    pub async fn render_feed(
        &self,
        feed: &FeedName,
        feed_type: Option<&str>,
    ) -> Result<RenderedFeed, AppError> {
        let format = match feed_type {
            Some(kind) => kind.parse::<FeedFormat>()?,
            None => FeedFormat::default(),
        };

        let entries = self.store.read_all(feed).await?;
        let body = feed::render(&self.metadata_for(feed), &entries, format);

        tracing::debug!(feed = %feed, entries = entries.len(), "Rendered feed");
        Ok(RenderedFeed { format, body })
    }

    /// Document-level metadata for a feed
    pub fn metadata_for(&self, feed: &FeedName) -> FeedMetadata {
        FeedMetadata {
            title: self.settings.title.clone(),
            id: format!("{}/feeds/{}", self.settings.base_url, feed),
            description: self.settings.description.clone(),
            logo: self.settings.logo_url.clone(),
        }
    }
}
