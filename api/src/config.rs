use std::env;
use std::path::PathBuf;

use anyhow::Context;

use crate::domain::entities::FeedName;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one `<feedname>.csv` log per feed
    pub feed_dir: PathBuf,
    /// Feed used when a request carries no `feedname`
    pub default_feed: FeedName,
    pub feed_title: String,
    pub feed_description: String,
    /// Base URL of this server, used to build canonical feed ids
    pub base_url: String,
    pub logo_url: Option<String>,
    pub port: u16,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_dir: PathBuf::from("./feeds"),
            default_feed: FeedName::default(),
            feed_title: "Audio from the interwebs".to_string(),
            feed_description: "Audio files collected from around the web".to_string(),
            base_url: "http://localhost:8080".to_string(),
            logo_url: None,
            port: 8080,
            rate_limit_per_second: 2,
            rate_limit_burst: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let default_feed = match env::var("PODCASTIT_DEFAULT_FEED") {
            Ok(name) => name
                .parse()
                .with_context(|| format!("PODCASTIT_DEFAULT_FEED is not a valid feed name: {name}"))?,
            Err(_) => defaults.default_feed,
        };

        Ok(Self {
            feed_dir: env::var("PODCASTIT_FEED_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.feed_dir),
            default_feed,
            feed_title: env::var("PODCASTIT_FEED_TITLE").unwrap_or(defaults.feed_title),
            feed_description: env::var("PODCASTIT_FEED_DESCRIPTION")
                .unwrap_or(defaults.feed_description),
            base_url: env::var("PODCASTIT_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            logo_url: env::var("PODCASTIT_LOGO_URL").ok().filter(|u| !u.is_empty()),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            rate_limit_per_second: parse_var("RATE_LIMIT_PER_SECOND")?
                .unwrap_or(defaults.rate_limit_per_second),
            rate_limit_burst: parse_var("RATE_LIMIT_BURST")?.unwrap_or(defaults.rate_limit_burst),
        })
    }
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value: {value}")),
        Err(_) => Ok(None),
    }
}
