//! Display ordering for the countdown list.

use super::days::days_until;
use crate::model::entry::CountdownEntry;
use chrono::{DateTime, TimeZone};
use feruca::Collator;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Caller-held sort preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMethod {
    /// Soonest first; most overdue entries lead.
    #[default]
    ByProximity,
    /// Case-insensitive by name.
    Alphabetical,
}

impl SortMethod {
    /// The other method; drives the list header toggle.
    pub fn toggle(self) -> Self {
        match self {
            Self::ByProximity => Self::Alphabetical,
            Self::Alphabetical => Self::ByProximity,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ByProximity => "days",
            Self::Alphabetical => "alphabetical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortMethodParseError(pub String);

impl Display for SortMethodParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported sort method `{}`; expected days|alphabetical",
            self.0
        )
    }
}

impl Error for SortMethodParseError {}

impl FromStr for SortMethod {
    type Err = SortMethodParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "days" | "proximity" | "by_proximity" => Ok(Self::ByProximity),
            "alphabetical" | "a-z" | "name" => Ok(Self::Alphabetical),
            other => Err(SortMethodParseError(other.to_string())),
        }
    }
}

/// Returns a sorted copy of `entries`. The sort is stable: ties keep input
/// order.
pub fn sort_entries<Tz: TimeZone>(
    entries: &[CountdownEntry],
    method: SortMethod,
    now: &DateTime<Tz>,
) -> Vec<CountdownEntry> {
    let mut sorted = entries.to_vec();
    match method {
        SortMethod::ByProximity => {
            sorted.sort_by_cached_key(|entry| days_until(&entry.target_date, now));
        }
        SortMethod::Alphabetical => {
            let mut collator = Collator::default();
            sorted.sort_by(|a, b| compare_names(&mut collator, &a.name, &b.name));
        }
    }
    sorted
}

/// Unicode Collation Algorithm order (CLDR root). Case and accents only
/// matter once base letters tie; identical collation keys fall back to
/// code-point order so the result is total.
fn compare_names(collator: &mut Collator, left: &str, right: &str) -> Ordering {
    collator
        .collate(left, right)
        .then_with(|| left.cmp(right))
}
