//! Calendar and time window helpers.
//!
//! # Time Model
//! All instants are roster-local wall-clock times (`NaiveDateTime`).
//! Rosters are published in the program's local time zone and every rule
//! (weekends, Fridays, Saturday daytime) is phrased in that local time, so
//! no zone conversion happens inside the crate.
//!
//! # Intervals
//! Shift windows are half-open: `[start, end)`. Date ranges are closed:
//! `[first, last]`.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whether the window has positive length.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Duration of this window in hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        hours_between(self.start, self.end)
    }

    /// Whether an instant falls within this window.
    #[inline]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Idle hours between two windows, in either order.
    ///
    /// Returns 0 when the windows overlap or touch.
    pub fn gap_hours(&self, other: &Self) -> f64 {
        if self.overlaps(other) {
            return 0.0;
        }
        if other.start >= self.end {
            hours_between(self.end, other.start)
        } else {
            hours_between(other.end, self.start)
        }
    }

    /// Calendar days touched by the window.
    ///
    /// A window ending exactly at midnight does not claim the next day.
    pub fn days(&self) -> DateRange {
        let last_instant = if self.is_valid() {
            self.end - Duration::seconds(1)
        } else {
            self.start
        };
        DateRange::new(self.start.date(), last_instant.date())
    }
}

/// A closed range of calendar dates [first, last].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// First date (inclusive).
    pub first: NaiveDate,
    /// Last date (inclusive).
    pub last: NaiveDate,
}

impl DateRange {
    /// Creates a new date range. `last` before `first` yields an empty range.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self { first, last }
    }

    /// Whether a date falls within the range.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    /// Iterates over every date in the range.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first.iter_days().take_while(move |d| *d <= self.last)
    }

    /// Dates shared with another range, ascending.
    pub fn intersection(&self, other: &Self) -> Vec<NaiveDate> {
        let first = self.first.max(other.first);
        let last = self.last.min(other.last);
        DateRange::new(first, last).iter().collect()
    }
}

/// Signed hours from `from` to `to`.
#[inline]
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_HOUR
}

/// Whether a date falls on Saturday or Sunday.
#[inline]
pub fn is_weekend_day(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
