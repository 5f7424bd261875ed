//! Atom 1.0 (RFC 4287) rendering.

use atom_syndication::{
    ContentBuilder, Entry as AtomEntry, FeedBuilder, FixedDateTime, GeneratorBuilder, Link,
    LinkBuilder, Text,
};
use chrono::{DateTime, Utc};

use super::renderer::{describe, enclosure_href, enclosure_mime_type, GENERATOR};
use crate::domain::entities::{Entry, FeedMetadata};

pub(super) fn render_atom(metadata: &FeedMetadata, entries: &[Entry]) -> String {
    // Latest submission, or the epoch for an empty feed, keeps output clock-free
    let updated: FixedDateTime = entries
        .iter()
        .map(Entry::submitted_at)
        .max()
        .unwrap_or_else(DateTime::<Utc>::default)
        .fixed_offset();

    let self_link: Link = LinkBuilder::default()
        .href(metadata.id.clone())
        .rel("self".to_string())
        .mime_type(Some("application/atom+xml".to_string()))
        .build();

    let feed = FeedBuilder::default()
        .title(Text::plain(metadata.title.clone()))
        .id(metadata.id.clone())
        .updated(updated)
        .subtitle(Some(Text::plain(metadata.description.clone())))
        .logo(metadata.logo.clone())
        .links(vec![self_link])
        .generator(Some(GeneratorBuilder::default().value(GENERATOR).build()))
        .entries(entries.iter().map(to_atom_entry).collect::<Vec<_>>())
        .build();

    feed.to_string()
}

fn to_atom_entry(entry: &Entry) -> AtomEntry {
    let published = entry.submitted_at().fixed_offset();

    let enclosure: Link = LinkBuilder::default()
        .href(enclosure_href(entry.url()))
        .rel("enclosure".to_string())
        .mime_type(Some(enclosure_mime_type(entry.url()).to_string()))
        .build();

    let content = ContentBuilder::default()
        .value(Some(describe(entry)))
        .content_type(Some("text".to_string()))
        .build();

    atom_syndication::EntryBuilder::default()
        .title(Text::plain(entry.title().to_string()))
        .id(entry.url())
        .updated(published)
        .published(Some(published))
        .links(vec![enclosure])
        .content(Some(content))
        .build()
}
