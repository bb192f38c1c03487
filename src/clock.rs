//! Injectable time source
//!
//! Streaks work on local calendar days, so every "today" is derived by
//! converting the current instant to the local timezone before taking the date.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// A simple clock abstraction for deterministic time in the tracker and tests
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Real system time
    #[default]
    System,
    /// Frozen at a given instant
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock fixed at the given timestamp
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Current instant according to the clock
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Current local calendar date
    pub fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }

    /// Advance a fixed clock; no effect on the system clock
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Whole calendar days from `earlier` to `later` (negative if reversed)
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

#[cfg(test)]
pub(crate) fn test_clock() -> Clock {
    // 2026-03-02T12:00:00Z, midday so a local offset cannot move the date twice
    Clock::fixed(DateTime::<Utc>::from_timestamp(1_772_452_800, 0).unwrap_or_default())
}
