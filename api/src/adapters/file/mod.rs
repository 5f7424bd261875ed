//! File adapters
//!
//! Implementations of port traits on top of the local filesystem.

pub mod entry_log;

pub use entry_log::FileEntryStore;
