//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list/add/edit/delete/clear as sync functions to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Timestamps cross the boundary as Unix epoch milliseconds (UTC).
//! - Storage faults degrade per core policy; only input and lookup errors
//!   are reported as failures.

use chrono::{DateTime, Utc};
use countdown_core::db::open_db;
use countdown_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, Clock,
    CountdownService, CountdownView, EntryId, EntryStore, SortMethod, SqliteKeyValueStore,
    SystemClock,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const COUNTDOWN_DB_FILE_NAME: &str = "countdown.sqlite3";
const COUNTDOWN_DB_PATH_ENV: &str = "COUNTDOWN_DB_PATH";
static COUNTDOWN_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the countdown list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownItem {
    pub entry_id: String,
    pub name: String,
    pub target_epoch_ms: i64,
    /// Target calendar day, `YYYY-MM-DD`, in the device time zone.
    pub target_day: String,
    pub days_until: i64,
    pub past_due: bool,
    /// `"N days until"` or `"Past due"`.
    pub label: String,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownListResponse {
    pub items: Vec<CountdownItem>,
    /// Sort method actually applied (`days|alphabetical`).
    pub applied_sort: String,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownActionResponse {
    pub ok: bool,
    /// Affected entry ID, when there is one.
    pub entry_id: Option<String>,
    pub message: String,
}

impl CountdownActionResponse {
    fn success(message: impl Into<String>, entry_id: Option<String>) -> Self {
        Self {
            ok: true,
            entry_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            message: message.into(),
        }
    }
}

/// Lists countdowns in display order.
///
/// `sort` accepts `days|alphabetical`; unknown or missing values fall back to
/// `days`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; storage failures yield an empty list plus a message.
#[flutter_rust_bridge::frb(sync)]
pub fn countdown_list(sort: Option<String>) -> CountdownListResponse {
    let method = normalize_sort(sort.as_deref());
    match with_service(|service| service.list(method)) {
        Ok(rows) => {
            let items = rows.iter().map(to_countdown_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No countdowns.".to_string()
            } else {
                format!("{} countdown(s).", items.len())
            };
            CountdownListResponse {
                items,
                applied_sort: method.as_str().to_string(),
                message,
            }
        }
        Err(err) => CountdownListResponse {
            items: Vec::new(),
            applied_sort: method.as_str().to_string(),
            message: format!("countdown_list failed: {err}"),
        },
    }
}

/// Creates a countdown.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns created entry ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn countdown_add(name: String, target_epoch_ms: i64) -> CountdownActionResponse {
    let Some(target) = epoch_ms_to_utc(target_epoch_ms) else {
        return CountdownActionResponse::failure(format!(
            "countdown_add failed: target_epoch_ms out of range: {target_epoch_ms}"
        ));
    };
    match with_service(|service| service.add(&name, target)) {
        Ok(Ok(entry)) => {
            CountdownActionResponse::success("Countdown saved.", Some(entry.id.to_string()))
        }
        Ok(Err(err)) => CountdownActionResponse::failure(format!("countdown_add failed: {err}")),
        Err(err) => CountdownActionResponse::failure(format!("countdown_add failed: {err}")),
    }
}

/// Renames/retargets an existing countdown.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Unknown `entry_id` returns `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn countdown_update(
    entry_id: String,
    name: String,
    target_epoch_ms: i64,
) -> CountdownActionResponse {
    let Some(target) = epoch_ms_to_utc(target_epoch_ms) else {
        return CountdownActionResponse::failure(format!(
            "countdown_update failed: target_epoch_ms out of range: {target_epoch_ms}"
        ));
    };
    let id = EntryId::from(entry_id.trim());
    match with_service(|service| service.edit(&id, &name, target)) {
        Ok(Ok(entry)) => {
            CountdownActionResponse::success("Countdown updated.", Some(entry.id.to_string()))
        }
        Ok(Err(err)) => {
            CountdownActionResponse::failure(format!("countdown_update failed: {err}"))
        }
        Err(err) => CountdownActionResponse::failure(format!("countdown_update failed: {err}")),
    }
}

/// Deletes one countdown by ID. Deleting an unknown ID succeeds as a no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn countdown_delete(entry_id: String) -> CountdownActionResponse {
    let id = EntryId::from(entry_id.trim());
    match with_service(|service| service.delete(&id)) {
        Ok(true) => CountdownActionResponse::success("Countdown deleted.", Some(id.to_string())),
        Ok(false) => CountdownActionResponse::success("Nothing to delete.", None),
        Err(err) => CountdownActionResponse::failure(format!("countdown_delete failed: {err}")),
    }
}

/// Deletes every countdown.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn countdown_clear_all() -> CountdownActionResponse {
    match with_service(|service| service.clear_all()) {
        Ok(()) => CountdownActionResponse::success("All countdowns cleared.", None),
        Err(err) => CountdownActionResponse::failure(format!("countdown_clear_all failed: {err}")),
    }
}

/// Days from today (device time zone) to the calendar day of `target_epoch_ms`.
///
/// Out-of-range timestamps return `0`.
#[flutter_rust_bridge::frb(sync)]
pub fn countdown_days_until(target_epoch_ms: i64) -> i64 {
    match epoch_ms_to_utc(target_epoch_ms) {
        Some(target) => countdown_core::days_until(&target, &SystemClock.now()),
        None => 0,
    }
}

fn normalize_sort(sort: Option<&str>) -> SortMethod {
    match sort.map(str::parse::<SortMethod>) {
        Some(Ok(method)) => method,
        Some(Err(err)) => {
            warn!("event=countdown_list module=ffi status=fallback error={err}");
            SortMethod::default()
        }
        None => SortMethod::default(),
    }
}

fn epoch_ms_to_utc(epoch_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
}

fn resolve_db_path() -> PathBuf {
    COUNTDOWN_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(COUNTDOWN_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(COUNTDOWN_DB_FILE_NAME)
        })
        .clone()
}

fn with_service<T>(
    f: impl FnOnce(&CountdownService<SqliteKeyValueStore<'_>, SystemClock>) -> T,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("countdown DB open failed: {err}"))?;
    let store = EntryStore::new(SqliteKeyValueStore::new(&conn));
    let service = CountdownService::new(store, SystemClock);
    Ok(f(&service))
}

fn to_countdown_item(row: &CountdownView) -> CountdownItem {
    CountdownItem {
        entry_id: row.id.to_string(),
        name: row.name.clone(),
        target_epoch_ms: row.target_date.timestamp_millis(),
        target_day: row.target_day.format("%Y-%m-%d").to_string(),
        days_until: row.days_until,
        past_due: row.status.is_past_due(),
        label: row.label(),
    }
}
