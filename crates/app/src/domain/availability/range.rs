//! Half-open booking date ranges.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use thiserror::Error;

/// Calendar day of `now` in UTC.
///
/// All stay dates are civil dates on the property's ledger day, which this
/// system keeps in UTC.
#[must_use]
pub fn today_utc(now: Timestamp) -> Date {
    now.to_zoned(TimeZone::UTC).date()
}

/// A half-open date interval `[start, end)`.
///
/// The checkout day is excluded: a stay `[2030-06-01, 2030-06-03)` occupies
/// two nights and does not conflict with one starting on `2030-06-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("end date must be after start date")]
pub struct EmptyDateRange;

impl DateRange {
    /// Build a range, rejecting `start >= end`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDateRange`] when the interval contains no nights.
    pub fn new(start: Date, end: Date) -> Result<Self, EmptyDateRange> {
        if start >= end {
            return Err(EmptyDateRange);
        }

        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of nights in the interval.
    #[must_use]
    pub fn nights(&self) -> u32 {
        // A constructed range always has end > start.
        u32::try_from((self.end - self.start).get_days()).unwrap_or(0)
    }

    /// Two half-open intervals conflict iff `s1 < e2 && s2 < e1`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the stay begins before the given day.
    #[must_use]
    pub fn starts_before(&self, day: Date) -> bool {
        self.start < day
    }
}
