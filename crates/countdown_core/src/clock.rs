//! "Now" providers for date derivations.
//!
//! The reference instant carries its time zone rather than a fixed offset:
//! a target date picked under summer time must still land on its own
//! calendar day when viewed under winter time.

use chrono::{DateTime, Local, TimeZone};

/// Source of the current instant.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Device clock in the local time zone (DST-aware).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to one instant in any time zone.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone>(pub DateTime<Tz>);

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.0.clone()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    type Tz = C::Tz;

    fn now(&self) -> DateTime<Self::Tz> {
        (**self).now()
    }
}
