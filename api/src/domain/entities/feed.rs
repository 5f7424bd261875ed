//! Feed domain types
//!
//! Feed names, output formats and the per-feed descriptive metadata.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DomainError;

/// Name of the feed used when a request does not pick one
pub const DEFAULT_FEED_NAME: &str = "podcast";

static FEED_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("feed name pattern is valid"));

/// Identifies a named collection of entries; maps 1:1 to a log file
///
/// Restricted to ASCII letters, digits, `-` and `_` so it is always a safe
/// single path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedName(String);

impl FeedName {
    /// File name of the log backing this feed
    pub fn log_file_name(&self) -> String {
        format!("{}.csv", self.0)
    }
}

impl Default for FeedName {
    fn default() -> Self {
        Self(DEFAULT_FEED_NAME.to_string())
    }
}

impl std::fmt::Display for FeedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FeedName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if FEED_NAME_RE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::InvalidInput(format!(
                "Invalid feed name '{}': use 1-64 letters, digits, '-' or '_'",
                s
            )))
        }
    }
}

/// Syndication format of a rendered feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedFormat {
    #[default]
    Atom,
    Rss,
}

impl std::fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedFormat::Atom => write!(f, "atom"),
            FeedFormat::Rss => write!(f, "rss"),
        }
    }
}

impl std::str::FromStr for FeedFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "atom" => Ok(FeedFormat::Atom),
            "rss" => Ok(FeedFormat::Rss),
            _ => Err(DomainError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Document-level fields of a feed. Comes from configuration, never from entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMetadata {
    pub title: String,
    /// Canonical id, also used as the feed's link
    pub id: String,
    pub description: String,
    pub logo: Option<String>,
}
