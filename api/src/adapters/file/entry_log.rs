//! CSV file adapter for EntryStore
//!
//! Each feed is a `<feedname>.csv` file in the configured directory holding one
//! `timestamp,url,title` record per entry, in append order.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use csv::StringRecord;
use dashmap::DashMap;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::domain::entities::{Entry, FeedName};
use crate::domain::ports::EntryStore;
use crate::error::DomainError;

const FIELDS_PER_RECORD: usize = 3;

/// Append-only CSV log implementation of EntryStore
#[derive(Debug)]
pub struct FileEntryStore {
    dir: PathBuf,
    /// One lock per feed, held for a single open-write-flush
    append_locks: DashMap<FeedName, Arc<Mutex<()>>>,
}

impl FileEntryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            append_locks: DashMap::new(),
        }
    }

    /// Path of the log file backing a feed
    pub fn log_path(&self, feed: &FeedName) -> PathBuf {
        self.dir.join(feed.log_file_name())
    }

    fn append_lock(&self, feed: &FeedName) -> Arc<Mutex<()>> {
        self.append_locks.entry(feed.clone()).or_default().clone()
    }
}

#[async_trait]
impl EntryStore for FileEntryStore {
    async fn append(&self, feed: &FeedName, entry: &Entry) -> Result<(), DomainError> {
        let record = encode_record(entry)?;
        let path = self.log_path(feed);

        let lock = self.append_lock(feed);
        let _guard = lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        // The whole record goes out in one write so appends never interleave
        file.write_all(&record).await?;
        file.flush().await?;
        file.sync_data().await?;

        debug!(path = ?path, url = entry.url(), "Appended entry to feed log");
        Ok(())
    }

    async fn read_all(&self, feed: &FeedName) -> Result<Vec<Entry>, DomainError> {
        let path = self.log_path(feed);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?path, "Feed log does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        decode_log(feed, &bytes)
    }
}

/// Serialize one entry as a single newline-terminated CSV record
fn encode_record(entry: &Entry) -> Result<Vec<u8>, DomainError> {
    let submitted_at = entry
        .submitted_at()
        .to_rfc3339_opts(SecondsFormat::Micros, false);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record([submitted_at.as_str(), entry.url(), entry.title()])
        .map_err(|e| DomainError::Internal(format!("Failed to encode record: {}", e)))?;

    writer
        .into_inner()
        .map_err(|e| DomainError::Internal(format!("Failed to encode record: {}", e)))
}

/// Parse a whole log, failing on the first record that cannot be read back
fn decode_log(feed: &FeedName, bytes: &[u8]) -> Result<Vec<Entry>, DomainError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            corrupt(feed, line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let entry = decode_record(&record).map_err(|reason| corrupt(feed, line, reason))?;
        entries.push(entry);
    }

    Ok(entries)
}

fn decode_record(record: &StringRecord) -> Result<Entry, String> {
    if record.len() != FIELDS_PER_RECORD {
        return Err(format!(
            "expected {} fields, found {}",
            FIELDS_PER_RECORD,
            record.len()
        ));
    }

    let submitted_at = DateTime::parse_from_rfc3339(&record[0])
        .map_err(|e| format!("invalid timestamp '{}': {}", &record[0], e))?
        .with_timezone(&Utc);

    Entry::from_stored(&record[1], &record[2], submitted_at).map_err(|e| e.to_string())
}

fn corrupt(feed: &FeedName, line: u64, reason: String) -> DomainError {
    error!(feed = %feed, line, reason = %reason, "Corrupt record in feed log");
    DomainError::CorruptRecord {
        feed: feed.to_string(),
        line,
        reason,
    }
}
