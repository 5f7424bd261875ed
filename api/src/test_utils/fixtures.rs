//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, TimeZone, Utc};

use crate::config::Config;
use crate::domain::entities::{Entry, FeedMetadata};

/// Fixed submission time so rendered output is stable across runs
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

/// Create a test entry with a derived title
pub fn test_entry(url: &str) -> Entry {
    test_entry_at(url, test_time())
}

/// Create a test entry submitted at a specific time
pub fn test_entry_at(url: &str, submitted_at: DateTime<Utc>) -> Entry {
    Entry::new(url, None, submitted_at).unwrap()
}

/// Create test feed metadata without a logo
pub fn test_metadata() -> FeedMetadata {
    FeedMetadata {
        title: "Audio from the interwebs".to_string(),
        id: "http://localhost:8080/feeds/podcast".to_string(),
        description: "Audio files collected from around the web".to_string(),
        logo: None,
    }
}

/// Create a test config whose feeds live in `feed_dir`
pub fn test_config(feed_dir: &std::path::Path) -> Config {
    Config {
        feed_dir: feed_dir.to_path_buf(),
        ..Config::default()
    }
}
