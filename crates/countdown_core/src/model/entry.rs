//! Countdown entry model.
//!
//! # Responsibility
//! - Define `CountdownEntry` and its stable identifier.
//! - Validate user-editable fields at the create/edit boundary.
//! - Fix the persisted wire shape: camelCase keys, ISO-8601 UTC timestamps.
//!
//! # Invariants
//! - `id` is non-empty and unique within a collection.
//! - `name` is non-empty after trimming for any entry written by core.
//! - `target_date` may lie in the past; past-due is a valid state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier of one countdown entry.
///
/// Newly created entries get a UUID v4 string. Documents written by older
/// shells carry other id shapes (timestamps), so any non-empty string is a
/// valid id once read back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validation failures for user-editable entry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyId,
    EmptyName,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "entry id cannot be empty"),
            Self::EmptyName => write!(f, "countdown name cannot be empty"),
        }
    }
}

impl Error for EntryValidationError {}

/// One countdown record as persisted and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownEntry {
    pub id: EntryId,
    /// User-chosen display name.
    pub name: String,
    /// Moment being counted down to. Only its calendar day matters for display.
    #[serde(with = "iso_timestamp")]
    pub target_date: DateTime<Utc>,
    /// Set once when the add flow completes.
    #[serde(with = "iso_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl CountdownEntry {
    /// Creates an entry with a freshly generated id.
    ///
    /// The name is stored as given; callers on the create path run
    /// [`normalize_name`] first.
    pub fn new(
        name: impl Into<String>,
        target_date: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::with_id(EntryId::generate(), name, target_date, created_at)
    }

    /// Creates an entry with a caller-provided id (import and test paths).
    pub fn with_id(
        id: impl Into<EntryId>,
        name: impl Into<String>,
        target_date: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_date,
            created_at,
        }
    }

    /// Checks the fields the create/edit boundary is responsible for.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.id.is_empty() {
            return Err(EntryValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(EntryValidationError::EmptyName);
        }
        Ok(())
    }

    /// Applies an edit. `id` and `created_at` are left untouched.
    pub fn rename_and_retarget(&mut self, name: impl Into<String>, target_date: DateTime<Utc>) {
        self.name = name.into();
        self.target_date = target_date;
    }
}

/// Trims a user-entered name and rejects it when nothing is left.
pub fn normalize_name(raw: &str) -> Result<String, EntryValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EntryValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Serde adapter for persisted timestamps.
///
/// Writes `YYYY-MM-DDTHH:MM:SS.mmmZ`; reads any RFC 3339 value and
/// normalizes it to UTC.
pub mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|err| de::Error::custom(format!("invalid timestamp `{raw}`: {err}")))
    }

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw.trim()).map(|value| value.with_timezone(&Utc))
    }
}
