use chrono::{DateTime, TimeZone, Utc};
use countdown_core::db::open_db_in_memory;
use countdown_core::{
    CountdownEntry, EntryStore, KeyValueStore, KvError, KvResult, MemoryKeyValueStore,
    SqliteKeyValueStore, StoreError, DEFAULT_STORAGE_KEY,
};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn sample_entries() -> Vec<CountdownEntry> {
    vec![
        CountdownEntry::new("Wedding", utc(2026, 9, 12, 15, 30, 0), utc(2025, 1, 3, 8, 0, 1)),
        CountdownEntry::new("Tax day", utc(2025, 4, 15, 0, 0, 0), utc(2025, 1, 4, 22, 10, 59)),
        CountdownEntry::with_id(
            "1736000000000",
            "Old release",
            utc(2020, 2, 29, 12, 0, 0),
            utc(2019, 12, 31, 23, 59, 59),
        ),
    ]
}

/// Backend whose every call fails.
struct BrokenBackend;

impl KeyValueStore for BrokenBackend {
    fn get(&self, _key: &str) -> KvResult<Option<String>> {
        Err(KvError::Unavailable("disk detached".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> KvResult<()> {
        Err(KvError::Unavailable("disk detached".to_string()))
    }
}

#[test]
fn load_without_prior_save_is_empty() {
    let store = EntryStore::new(MemoryKeyValueStore::new());
    assert!(store.load().is_empty());
    assert!(store.try_load().unwrap().is_empty());
}

#[test]
fn save_then_load_roundtrips_in_insertion_order() {
    let store = EntryStore::new(MemoryKeyValueStore::new());
    let entries = sample_entries();

    assert!(store.save(&entries));
    assert_eq!(store.load(), entries);
}

#[test]
fn saving_twice_is_idempotent() {
    let store = EntryStore::new(MemoryKeyValueStore::new());
    let entries = sample_entries();

    store.save(&entries);
    store.save(&entries);
    assert_eq!(store.load(), entries);
}

#[test]
fn save_replaces_whole_collection() {
    let store = EntryStore::new(MemoryKeyValueStore::new());
    let entries = sample_entries();
    store.save(&entries);

    store.save(&entries[1..2]);
    assert_eq!(store.load(), entries[1..2].to_vec());

    store.save(&[]);
    assert!(store.load().is_empty());
}

#[test]
fn sub_millisecond_precision_is_dropped_on_roundtrip() {
    let store = EntryStore::new(MemoryKeyValueStore::new());
    let precise = utc(2025, 5, 1, 10, 0, 0) + chrono::Duration::microseconds(1_234_567);
    let entry = CountdownEntry::new("Precise", precise, precise);

    store.save(&[entry]);
    let loaded = store.load();
    assert_eq!(
        loaded[0].target_date,
        utc(2025, 5, 1, 10, 0, 1) + chrono::Duration::milliseconds(234)
    );
}

#[test]
fn corrupt_document_loads_as_empty() {
    let backend = MemoryKeyValueStore::new();
    backend.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
    let store = EntryStore::new(&backend);

    assert!(store.load().is_empty());
    assert!(matches!(store.try_load(), Err(StoreError::Decode(_))));
}

#[test]
fn schema_mismatch_loads_as_empty() {
    let backend = MemoryKeyValueStore::new();
    backend
        .set(DEFAULT_STORAGE_KEY, r#"{"entries": []}"#)
        .unwrap();
    let store = EntryStore::new(&backend);

    assert!(store.load().is_empty());
}

#[test]
fn storage_failures_degrade_instead_of_erroring() {
    let store = EntryStore::new(BrokenBackend);

    assert!(store.load().is_empty());
    assert!(!store.save(&sample_entries()));
    let err = store.try_save(&sample_entries()).unwrap_err();
    assert_eq!(err.code(), "storage_failed");
}

#[test]
fn documents_from_older_shells_are_readable() {
    let backend = MemoryKeyValueStore::new();
    backend
        .set(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":"1718000000000","name":"Trip","targetDate":"2024-07-01T04:00:00.000Z","createdAt":"2024-06-10T12:13:20.000Z"}]"#,
        )
        .unwrap();
    let store = EntryStore::new(&backend);

    let entries = store.load();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id.as_str(), "1718000000000");
    assert_eq!(entries[0].target_date, utc(2024, 7, 1, 4, 0, 0));
}

#[test]
fn custom_key_isolates_collections() {
    let backend = MemoryKeyValueStore::new();
    let primary = EntryStore::new(&backend);
    let scratch = EntryStore::with_key(&backend, "scratch_entries");

    primary.save(&sample_entries());
    assert!(scratch.load().is_empty());
    assert_eq!(scratch.key(), "scratch_entries");
    assert_eq!(backend.len(), 1);
}

#[test]
fn sqlite_backend_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let store = EntryStore::new(SqliteKeyValueStore::new(&conn));
    let entries = sample_entries();

    assert!(store.save(&entries));
    assert_eq!(store.load(), entries);

    let remaining: Vec<_> = entries
        .iter()
        .filter(|entry| entry.id.as_str() != "1736000000000")
        .cloned()
        .collect();
    store.save(&remaining);
    assert!(store
        .load()
        .iter()
        .all(|entry| entry.id.as_str() != "1736000000000"));
}
