//! Time windows occupied by events.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The occupancy of a location on one calendar date: `[start, end]`.
///
/// Both ends are inclusive. The model does not require `start <= end`;
/// request validation rejects inverted windows before they get here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub location: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(
        location: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self {
            location: location.into(),
            date,
            start,
            end,
        }
    }

    /// True if both windows sit at the same location on the same date.
    pub fn same_slot(&self, other: &Self) -> bool {
        self.location == other.location && self.date == other.date
    }

    /// Check if a time of day lies inside this window (inclusive on both ends).
    pub fn contains(&self, t: NaiveTime) -> bool {
        self.start <= t && t <= self.end
    }

    /// Check if this window fully covers another one's time range.
    pub fn covers(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Check if this window overlaps with another.
    ///
    /// Windows at different locations or on different dates never overlap.
    /// Otherwise they overlap when this window's start or end falls inside
    /// `other`, or when this window covers `other` entirely. Touching
    /// endpoints count as an overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        if !self.same_slot(other) {
            return false;
        }

        other.contains(self.start) || other.contains(self.end) || self.covers(other)
    }
}

/// Free-function form of [`TimeWindow::overlaps`].
pub fn overlaps(a: &TimeWindow, b: &TimeWindow) -> bool {
    a.overlaps(b)
}
