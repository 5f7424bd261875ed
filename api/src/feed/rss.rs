//! RSS 2.0 rendering.

use ::rss::{ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder, Item, ItemBuilder};

use super::renderer::{describe, enclosure_href, enclosure_mime_type, GENERATOR};
use crate::domain::entities::{Entry, FeedMetadata};

/// Enclosure lengths are unknown and written as 0, and hrefs may carry
/// `%40`/`%5B`/`%5D` escapes, so the channel is not passed through `rss` validation.
pub(super) fn render_rss(metadata: &FeedMetadata, entries: &[Entry]) -> String {
    let image = metadata.logo.as_ref().map(|logo| {
        ImageBuilder::default()
            .url(logo.clone())
            .title(metadata.title.clone())
            .link(metadata.id.clone())
            .build()
    });

    let channel = ChannelBuilder::default()
        .title(metadata.title.clone())
        .link(metadata.id.clone())
        .description(metadata.description.clone())
        .generator(GENERATOR.to_string())
        .image(image)
        .items(entries.iter().map(to_rss_item).collect::<Vec<_>>())
        .build();

    channel.to_string()
}

fn to_rss_item(entry: &Entry) -> Item {
    let enclosure = EnclosureBuilder::default()
        .url(enclosure_href(entry.url()))
        .length("0".to_string())
        .mime_type(enclosure_mime_type(entry.url()).to_string())
        .build();

    ItemBuilder::default()
        .title(entry.title().to_string())
        .guid(
            GuidBuilder::default()
                .value(entry.url().to_string())
                .permalink(false)
                .build(),
        )
        .enclosure(enclosure)
        .description(describe(entry))
        .pub_date(entry.submitted_at().to_rfc2822())
        .build()
}
