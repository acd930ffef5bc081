//! Core logic for the countdown app.
//! Owns the persisted countdown collection and the derived list view.

pub mod clock;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{CountdownEntry, EntryId, EntryValidationError};
pub use service::countdown_service::{CountdownService, ServiceError, ServiceResult};
pub use store::entry_store::{EntryStore, StoreError, StoreResult, DEFAULT_STORAGE_KEY};
pub use view::{build_view, days_until, sort_entries, CountdownStatus, CountdownView, SortMethod};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
