//! Derived, display-ready views over the countdown collection.
//!
//! # Responsibility
//! - Compute calendar-day distances ("days until").
//! - Classify entries as upcoming or past due.
//! - Order a collection by the caller's sort preference.
//!
//! # Invariants
//! - Everything here is pure: same inputs, same output, no I/O.
//! - Display order is recomputed per call and never persisted.

pub mod days;
pub mod sort;

use crate::model::entry::{CountdownEntry, EntryId};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub use days::{days_until, target_day, CountdownStatus};
pub use sort::{sort_entries, SortMethod, SortMethodParseError};

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownView {
    pub id: EntryId,
    pub name: String,
    pub target_date: DateTime<Utc>,
    /// Target calendar day in the reference time zone.
    pub target_day: NaiveDate,
    pub days_until: i64,
    pub status: CountdownStatus,
}

impl CountdownView {
    pub fn from_entry<Tz: TimeZone>(entry: &CountdownEntry, now: &DateTime<Tz>) -> Self {
        let days = days_until(&entry.target_date, now);
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            target_date: entry.target_date,
            target_day: target_day(&entry.target_date, now),
            days_until: days,
            status: CountdownStatus::from_days(days),
        }
    }

    /// Text shown under the entry name.
    pub fn label(&self) -> String {
        self.status.label()
    }
}

/// Sorts `entries` by `method` and derives one display row per entry.
pub fn build_view<Tz: TimeZone>(
    entries: &[CountdownEntry],
    method: SortMethod,
    now: &DateTime<Tz>,
) -> Vec<CountdownView> {
    sort_entries(entries, method, now)
        .iter()
        .map(|entry| CountdownView::from_entry(entry, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{build_view, CountdownStatus, SortMethod};
    use crate::model::entry::CountdownEntry;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-06-10T09:00:00+00:00").unwrap()
    }

    #[test]
    fn build_view_derives_status_and_label() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let entries = vec![
            CountdownEntry::with_id(
                "a",
                "Launch",
                Utc.with_ymd_and_hms(2025, 6, 13, 18, 0, 0).unwrap(),
                created,
            ),
            CountdownEntry::with_id(
                "b",
                "Today",
                Utc.with_ymd_and_hms(2025, 6, 10, 23, 0, 0).unwrap(),
                created,
            ),
        ];

        let rows = build_view(&entries, SortMethod::ByProximity, &now());

        assert_eq!(rows[0].name, "Today");
        assert_eq!(rows[0].status, CountdownStatus::PastDue);
        assert_eq!(rows[0].label(), "Past due");
        assert_eq!(rows[1].days_until, 3);
        assert_eq!(rows[1].label(), "3 days until");
        assert_eq!(rows[1].target_day.to_string(), "2025-06-13");
    }
}
