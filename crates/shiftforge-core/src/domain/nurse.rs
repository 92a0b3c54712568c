//! Nurse value object and its enums.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};

use super::NurseId;
use crate::error::ParseLevelError;

/// Ordered seniority scale.
///
/// Ordering follows experience: `Junior < Mid < Senior`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeniorityLevel {
    #[default]
    Junior,
    Mid,
    Senior,
}

impl SeniorityLevel {
    pub const ALL: [SeniorityLevel; 3] = [Self::Junior, Self::Mid, Self::Senior];

    /// Numeric rank, 1 for Junior up to 3 for Senior.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Junior => 1,
            Self::Mid => 2,
            Self::Senior => 3,
        }
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Junior => write!(f, "Junior"),
            Self::Mid => write!(f, "Mid"),
            Self::Senior => write!(f, "Senior"),
        }
    }
}

impl FromStr for SeniorityLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "junior" => Ok(Self::Junior),
            "mid" => Ok(Self::Mid),
            "senior" => Ok(Self::Senior),
            _ => Err(ParseLevelError {
                kind: "seniority level",
                value: s.to_string(),
            }),
        }
    }
}

/// Employment contract, each with a fixed hour cap over the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContractType {
    #[default]
    FullTime,
    PartTime,
    Casual,
}

impl ContractType {
    /// Contractual hour cap when no configuration overrides it.
    pub const fn default_weekly_hours(self) -> u32 {
        match self {
            Self::FullTime => 40,
            Self::PartTime => 30,
            Self::Casual => 20,
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullTime => write!(f, "FullTime"),
            Self::PartTime => write!(f, "PartTime"),
            Self::Casual => write!(f, "Casual"),
        }
    }
}

impl FromStr for ContractType {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "fulltime" => Ok(Self::FullTime),
            "parttime" => Ok(Self::PartTime),
            "casual" => Ok(Self::Casual),
            _ => Err(ParseLevelError {
                kind: "contract type",
                value: s.to_string(),
            }),
        }
    }
}

/// An approved absence, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOffRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub reason: String,
}

impl TimeOffRequest {
    pub fn new(start: NaiveDate, end: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            start,
            end,
            reason: reason.into(),
        }
    }

    /// A single day off.
    pub fn day(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self::new(date, date, reason)
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates the dates of the range in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

/// Scheduling preferences of a nurse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preferences {
    #[cfg_attr(feature = "serde", serde(default))]
    pub avoid_night_shifts: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_days: HashSet<Weekday>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_off: Vec<TimeOffRequest>,
}

/// A nurse as supplied by the HRIS snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nurse {
    pub id: NurseId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub certifications: BTreeSet<String>,
    pub seniority: SeniorityLevel,
    pub contract: ContractType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: Preferences,
}

impl Nurse {
    /// Creates a nurse with no certifications and default preferences.
    pub fn new(id: impl Into<NurseId>, seniority: SeniorityLevel, contract: ContractType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            certifications: BTreeSet::new(),
            seniority,
            contract,
            preferences: Preferences::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_certifications<I, S>(mut self, certifications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.certifications
            .extend(certifications.into_iter().map(Into::into));
        self
    }

    pub fn avoiding_nights(mut self) -> Self {
        self.preferences.avoid_night_shifts = true;
        self
    }

    pub fn with_preferred_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.preferences.preferred_days.extend(days);
        self
    }

    pub fn with_time_off(mut self, request: TimeOffRequest) -> Self {
        self.preferences.time_off.push(request);
        self
    }

    /// Returns true when the nurse holds every tag in `required`.
    pub fn holds_all<'a, I>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        required
            .into_iter()
            .all(|cert| self.certifications.contains(cert))
    }

    pub fn holds(&self, certification: &str) -> bool {
        self.certifications.contains(certification)
    }

    pub fn is_senior(&self) -> bool {
        self.seniority == SeniorityLevel::Senior
    }

    /// Returns true when any time-off range covers `date`.
    pub fn is_off_on(&self, date: NaiveDate) -> bool {
        self.preferences.time_off.iter().any(|r| r.covers(date))
    }
}
