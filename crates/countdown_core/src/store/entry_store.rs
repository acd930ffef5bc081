//! Entry Store: whole-collection load/save with best-effort semantics.
//!
//! # Responsibility
//! - Encode/decode the collection document (JSON array, ISO-8601 dates).
//! - Offer strict `try_*` variants and the degrading `load`/`save` pair.
//!
//! # Invariants
//! - `load` never fails: missing document is empty, broken document is empty.
//! - `save` never fails: errors are logged and dropped.
//! - Persisted order is the order of the slice passed to `save`.

use crate::kv::{KeyValueStore, KvError};
use crate::model::entry::CountdownEntry;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Fixed key the countdown collection lives under.
pub const DEFAULT_STORAGE_KEY: &str = "countdown_entries";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure surfaced by the strict `try_*` API.
#[derive(Debug)]
pub enum StoreError {
    Storage(KvError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl StoreError {
    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(_) => "storage_failed",
            Self::Encode(_) => "encode_failed",
            Self::Decode(_) => "decode_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode countdown entries: {err}"),
            Self::Decode(err) => write!(f, "failed to decode countdown entries: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Countdown collection store bound to one backend and one key.
pub struct EntryStore<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Creates a store using [`DEFAULT_STORAGE_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Loads the collection in persisted order.
    ///
    /// Degrades to an empty collection on any storage or decoding failure.
    pub fn load(&self) -> Vec<CountdownEntry> {
        let started_at = Instant::now();
        match self.try_load() {
            Ok(entries) => {
                debug!(
                    "event=entries_load module=store status=ok count={} duration_ms={}",
                    entries.len(),
                    started_at.elapsed().as_millis()
                );
                entries
            }
            Err(err) => {
                error!(
                    "event=entries_load module=store status=error duration_ms={} error_code={} error={err}",
                    started_at.elapsed().as_millis(),
                    err.code()
                );
                Vec::new()
            }
        }
    }

    /// Replaces the persisted collection with `entries`.
    ///
    /// Failures are logged and swallowed; the return value only reports
    /// whether the write reached the backend.
    pub fn save(&self, entries: &[CountdownEntry]) -> bool {
        let started_at = Instant::now();
        match self.try_save(entries) {
            Ok(()) => {
                info!(
                    "event=entries_save module=store status=ok count={} duration_ms={}",
                    entries.len(),
                    started_at.elapsed().as_millis()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=entries_save module=store status=error count={} duration_ms={} error_code={} error={err}",
                    entries.len(),
                    started_at.elapsed().as_millis(),
                    err.code()
                );
                false
            }
        }
    }

    /// Strict load: missing document is `Ok(vec![])`, anything else broken
    /// is an error.
    pub fn try_load(&self) -> StoreResult<Vec<CountdownEntry>> {
        match self.backend.get(&self.key)? {
            Some(document) => decode_entries(&document),
            None => Ok(Vec::new()),
        }
    }

    /// Strict save of the whole collection.
    pub fn try_save(&self, entries: &[CountdownEntry]) -> StoreResult<()> {
        let document = encode_entries(entries)?;
        self.backend.set(&self.key, &document)?;
        Ok(())
    }
}

/// Serializes a collection into the persisted document format.
pub fn encode_entries(entries: &[CountdownEntry]) -> StoreResult<String> {
    serde_json::to_string(entries).map_err(StoreError::Encode)
}

/// Parses a persisted document back into entries.
pub fn decode_entries(document: &str) -> StoreResult<Vec<CountdownEntry>> {
    serde_json::from_str(document).map_err(StoreError::Decode)
}
