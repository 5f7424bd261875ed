//! Entry domain entity
//!
//! One submitted audio URL. Entries are created exactly once, when they are
//! appended to a feed, and are never modified afterwards.

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::DomainError;

/// A submitted episode
///
/// Only built through [`Entry::new`] or [`Entry::from_stored`], both of which
/// validate the URL, so every `Entry` has an absolute URL with a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    url: String,
    host: String,
    title: String,
    submitted_at: DateTime<Utc>,
}

impl Entry {
    /// Build a new entry from a submission.
    ///
    /// A missing or blank `title` is replaced by `"<last path segment> from <host>"`.
    pub fn new(
        url: &str,
        title: Option<&str>,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let url = url.trim();
        let parsed = parse_url(url)?;
        let host = host_of(&parsed)?;

        let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => title.to_string(),
            None => default_title(&parsed, &host),
        };

        Ok(Self {
            url: url.to_string(),
            host,
            title,
            submitted_at,
        })
    }

    /// Rebuild an entry read back from storage. The title is taken as-is.
    pub fn from_stored(
        url: &str,
        title: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let parsed = parse_url(url)?;
        let host = host_of(&parsed)?;

        Ok(Self {
            url: url.to_string(),
            host,
            title: title.to_string(),
            submitted_at,
        })
    }

    /// The URL exactly as submitted
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

fn parse_url(raw: &str) -> Result<Url, DomainError> {
    if raw.is_empty() {
        return Err(DomainError::InvalidInput("No URL was specified".to_string()));
    }

    Url::parse(raw).map_err(|e| DomainError::InvalidInput(format!("Invalid URL '{}': {}", raw, e)))
}

fn host_of(url: &Url) -> Result<String, DomainError> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DomainError::InvalidInput(format!("URL '{}' has no host", url)))
}

fn default_title(url: &Url, host: &str) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last());

    match segment {
        Some(segment) => format!("{} from {}", segment, host),
        None => host.to_string(),
    }
}
