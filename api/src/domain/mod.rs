//! Domain layer
//!
//! Entries, feeds and the storage port, independent of HTTP and the filesystem.
//! - `entities`: Domain models for submitted entries and feeds
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
