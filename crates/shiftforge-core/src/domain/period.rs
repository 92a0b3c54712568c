//! Scheduling horizon.

use std::fmt;

use chrono::NaiveDate;

use super::Shift;

/// Inclusive date range covered by a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Horizon spanned by the start dates of `shifts`, or `None` when empty.
    pub fn spanning(shifts: &[Shift]) -> Option<Self> {
        let start = shifts.iter().map(Shift::date).min()?;
        let end = shifts.iter().map(Shift::date).max()?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The part of `start..=end` that falls inside the period.
    pub fn clamp(&self, start: NaiveDate, end: NaiveDate) -> Option<Self> {
        let start = start.max(self.start);
        let end = end.min(self.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Number of calendar days, counting both ends.
    pub fn days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1).max(0) as u32
    }

    /// Length in weeks, never less than one day's worth.
    pub fn weeks(&self) -> f64 {
        f64::from(self.days().max(1)) / 7.0
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
