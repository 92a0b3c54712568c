//! Roster produced by a successful solve.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{NurseId, Period, RosterId, ShiftId};

/// One nurse staffing one shift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub nurse_id: NurseId,
    pub shift_id: ShiftId,
}

impl Assignment {
    pub fn new(nurse_id: NurseId, shift_id: ShiftId) -> Self {
        Self { nurse_id, shift_id }
    }
}

/// Why a search stopped before exhausting its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    TimeLimit,
    Cancelled,
    NodeLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeLimit => write!(f, "time limit reached"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::NodeLimit => write!(f, "node limit reached"),
        }
    }
}

/// Terminal status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// Search tree exhausted with a solution: no better roster exists.
    Optimal,
    /// Stopped early holding a solution.
    Feasible,
    /// Search tree exhausted without a solution.
    Infeasible,
    /// Stopped early without a solution; feasibility is undecided.
    Unknown(StopReason),
}

impl SolveStatus {
    /// Optimal and Feasible are both successes.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal => write!(f, "OPTIMAL"),
            Self::Feasible => write!(f, "FEASIBLE"),
            Self::Infeasible => write!(f, "INFEASIBLE"),
            Self::Unknown(reason) => write!(f, "UNKNOWN ({})", reason),
        }
    }
}

/// Placeholders filled in later by external compliance and fairness auditors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterMetadata {
    pub generated_at: DateTime<Utc>,
    pub compliance_status: String,
    pub empathy_score: f64,
    pub compliance_notes: Option<String>,
    pub empathy_notes: Option<String>,
}

impl RosterMetadata {
    /// Metadata for a freshly generated, not yet audited roster.
    pub fn pending() -> Self {
        Self {
            generated_at: Utc::now(),
            compliance_status: "Pending".to_string(),
            empathy_score: 0.0,
            compliance_notes: None,
            empathy_notes: None,
        }
    }
}

/// A complete staffing plan for one horizon.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    pub id: RosterId,
    pub period: Period,
    pub assignments: Vec<Assignment>,
    pub metadata: RosterMetadata,
    /// Objective value of the materialized solution.
    pub objective: i64,
    pub status: SolveStatus,
}

impl Roster {
    /// Nurse assigned to `shift`, if any.
    pub fn nurse_for(&self, shift: &ShiftId) -> Option<&NurseId> {
        self.assignments
            .iter()
            .find(|a| &a.shift_id == shift)
            .map(|a| &a.nurse_id)
    }

    /// Shifts assigned to `nurse`, in roster order.
    pub fn shifts_of<'a>(&'a self, nurse: &'a NurseId) -> impl Iterator<Item = &'a ShiftId> + 'a {
        self.assignments
            .iter()
            .filter(move |a| &a.nurse_id == nurse)
            .map(|a| &a.shift_id)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
