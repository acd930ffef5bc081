//! Calendar-day arithmetic.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Whole calendar days from the day containing `now` to the day of `target`.
///
/// Both days are taken in `now`'s time zone, with the target converted
/// under that zone's rules for its own instant (so a DST change between the
/// two does not shift the target's day). Time of day is ignored on both
/// sides. Zero means "today", negatives are past.
pub fn days_until<Tz: TimeZone>(target: &DateTime<Utc>, now: &DateTime<Tz>) -> i64 {
    target_day(target, now)
        .signed_duration_since(now.date_naive())
        .num_days()
}

/// Calendar day of `target` in `now`'s time zone.
pub fn target_day<Tz: TimeZone>(target: &DateTime<Utc>, now: &DateTime<Tz>) -> NaiveDate {
    target.with_timezone(&now.timezone()).date_naive()
}

/// Display classification of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// Strictly in the future.
    Upcoming { days: u32 },
    /// Today or earlier.
    PastDue,
}

impl CountdownStatus {
    pub fn from_days(days: i64) -> Self {
        if days > 0 {
            Self::Upcoming {
                days: u32::try_from(days).unwrap_or(u32::MAX),
            }
        } else {
            Self::PastDue
        }
    }

    pub fn is_past_due(self) -> bool {
        matches!(self, Self::PastDue)
    }

    pub fn label(self) -> String {
        match self {
            Self::Upcoming { days } => format!("{days} days until"),
            Self::PastDue => "Past due".to_string(),
        }
    }
}
