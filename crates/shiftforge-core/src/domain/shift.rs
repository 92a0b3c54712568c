//! Shift value object.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use super::{Nurse, SeniorityLevel, ShiftId};

/// First hour of the day that no longer counts as night.
const NIGHT_END_HOUR: u32 = 6;

/// First hour of the evening that counts as night.
const NIGHT_START_HOUR: u32 = 20;

/// A shift to be staffed by exactly one nurse.
///
/// `end` may fall on the next calendar day for overnight shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shift {
    pub id: ShiftId,
    pub ward: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_certifications: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_level: SeniorityLevel,
}

impl Shift {
    pub fn new(
        id: impl Into<ShiftId>,
        ward: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            ward: ward.into(),
            start,
            end,
            required_certifications: BTreeSet::new(),
            min_level: SeniorityLevel::Junior,
        }
    }

    pub fn requiring<I, S>(mut self, certifications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_certifications
            .extend(certifications.into_iter().map(Into::into));
        self
    }

    pub fn with_min_level(mut self, level: SeniorityLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Length of the shift in whole minutes (0 for malformed shifts).
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }

    /// Calendar date the shift starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Night shifts start at 20:00 or later, or before 06:00.
    pub fn is_night(&self) -> bool {
        let hour = self.start.hour();
        hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
    }

    /// Certification and seniority eligibility of `nurse` for this shift.
    pub fn admits(&self, nurse: &Nurse) -> bool {
        nurse.seniority >= self.min_level && nurse.holds_all(&self.required_certifications)
    }

    /// Signed minutes between the end of `self` and the start of `later`.
    ///
    /// Negative when the two shifts overlap.
    pub fn gap_minutes_until(&self, later: &Shift) -> i64 {
        (later.start - self.end).num_minutes()
    }
}
