//! Countdown use-case service.
//!
//! # Responsibility
//! - Validate user input at the create/edit boundary.
//! - Load the full collection, change it in memory, save it back.
//!
//! # Invariants
//! - New entries are appended; persisted order stays insertion order.
//! - Edits change `name` and `target_date` only.
//! - Storage faults follow the store's degrade policy and are not errors here.

use crate::clock::Clock;
use crate::kv::KeyValueStore;
use crate::model::entry::{normalize_name, CountdownEntry, EntryId, EntryValidationError};
use crate::store::entry_store::EntryStore;
use crate::view::{build_view, CountdownView, SortMethod};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for countdown use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Validation(EntryValidationError),
    NotFound(EntryId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "countdown not found: {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<EntryValidationError> for ServiceError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Countdown service facade over a store and a clock.
pub struct CountdownService<S: KeyValueStore, C: Clock> {
    store: EntryStore<S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> CountdownService<S, C> {
    pub fn new(store: EntryStore<S>, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &EntryStore<S> {
        &self.store
    }

    /// Creates one countdown and appends it to the collection.
    pub fn add(&self, name: &str, target_date: DateTime<Utc>) -> ServiceResult<CountdownEntry> {
        let name = normalize_name(name)?;
        let created_at = self.clock.now().with_timezone(&Utc);
        let entry = CountdownEntry::new(name, target_date, created_at);
        entry.validate()?;

        let mut entries = self.store.load();
        entries.push(entry.clone());
        self.store.save(&entries);

        info!(
            "event=countdown_add module=service status=ok entry_id={} count={}",
            entry.id,
            entries.len()
        );
        Ok(entry)
    }

    /// Renames/retargets the countdown with `id`.
    pub fn edit(
        &self,
        id: &EntryId,
        name: &str,
        target_date: DateTime<Utc>,
    ) -> ServiceResult<CountdownEntry> {
        let name = normalize_name(name)?;
        let mut entries = self.store.load();
        let Some(entry) = entries.iter_mut().find(|entry| &entry.id == id) else {
            warn!("event=countdown_edit module=service status=error error_code=not_found entry_id={id}");
            return Err(ServiceError::NotFound(id.clone()));
        };
        entry.rename_and_retarget(name, target_date);
        let updated = entry.clone();
        self.store.save(&entries);

        info!("event=countdown_edit module=service status=ok entry_id={id}");
        Ok(updated)
    }

    /// Removes the countdown with `id`. Returns whether one was removed;
    /// unknown ids cause no write.
    pub fn delete(&self, id: &EntryId) -> bool {
        let mut entries = self.store.load();
        let before = entries.len();
        entries.retain(|entry| &entry.id != id);
        if entries.len() == before {
            info!("event=countdown_delete module=service status=noop entry_id={id}");
            return false;
        }
        self.store.save(&entries);
        info!(
            "event=countdown_delete module=service status=ok entry_id={id} count={}",
            entries.len()
        );
        true
    }

    /// Drops every countdown.
    pub fn clear_all(&self) {
        self.store.save(&[]);
        info!("event=countdown_clear module=service status=ok");
    }

    pub fn get(&self, id: &EntryId) -> Option<CountdownEntry> {
        self.store.load().into_iter().find(|entry| &entry.id == id)
    }

    /// Display rows ordered by `method` at the clock's current instant.
    pub fn list(&self, method: SortMethod) -> Vec<CountdownView> {
        let now = self.clock.now();
        build_view(&self.store.load(), method, &now)
    }
}
