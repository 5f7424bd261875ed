//! Feed renderer
//!
//! Pure mapping from feed metadata plus stored entries to a syndication
//! document. All timestamps come from the entries; nothing here reads the clock.

use url::Url;

use super::{atom, rss};
use crate::domain::entities::{Entry, FeedFormat, FeedMetadata};

pub(super) const GENERATOR: &str = "podcastit";

/// Audio and video MIME types recognised for enclosures
mod mime {
    pub const MP3: &str = "audio/mpeg";
    pub const M4A: &str = "audio/mp4";
    pub const AAC: &str = "audio/aac";
    pub const OGG_AUDIO: &str = "audio/ogg";
    pub const OPUS: &str = "audio/opus";
    pub const WAV: &str = "audio/wav";
    pub const FLAC: &str = "audio/flac";
    pub const WEBM_AUDIO: &str = "audio/webm";
    pub const MP4: &str = "video/mp4";
}

/// Render entries, in the order given, as a UTF-8 feed document
pub fn render(metadata: &FeedMetadata, entries: &[Entry], format: FeedFormat) -> Vec<u8> {
    let xml = match format {
        FeedFormat::Atom => atom::render_atom(metadata, entries),
        FeedFormat::Rss => rss::render_rss(metadata, entries),
    };

    xml.into_bytes()
}

/// Enclosure link for an entry: everything percent-encoded except `:` and `/`
pub fn enclosure_href(url: &str) -> String {
    urlencoding::encode(url)
        .replace("%3A", ":")
        .replace("%2F", "/")
}

/// Guess the enclosure MIME type from the URL path extension
pub fn enclosure_mime_type(url: &str) -> &'static str {
    let extension = Url::parse(url).ok().and_then(|u| {
        u.path()
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    });

    match extension.as_deref() {
        Some("m4a") => mime::M4A,
        Some("aac") => mime::AAC,
        Some("ogg") | Some("oga") => mime::OGG_AUDIO,
        Some("opus") => mime::OPUS,
        Some("wav") => mime::WAV,
        Some("flac") => mime::FLAC,
        Some("webm") => mime::WEBM_AUDIO,
        Some("mp4") => mime::MP4,
        _ => mime::MP3,
    }
}

/// Sentence used as an item's description/content
pub fn describe(entry: &Entry) -> String {
    format!(
        "This audio file from {} was added on {}.",
        entry.host(),
        entry.submitted_at().format("%Y-%m-%d")
    )
}
