//! Structured diagnosis of why no roster satisfies the hard rules.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use shiftforge_core::{
    FatigueLevel, Nurse, NurseId, Period, SeniorityLevel, ShiftId, SolveStatus,
};

/// Urgency of a conflict or recommendation. Sorts most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Overall capacity verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapacityStatus {
    Ok,
    /// Enough hours, but below the configured safety margin.
    Warning,
    Critical,
}

/// Demanded shift hours against fatigue-discounted contract hours.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityAnalysis {
    pub required_hours: f64,
    pub available_hours: f64,
    pub coverage_ratio: f64,
    pub is_understaffed: bool,
    pub shortage_hours: f64,
    pub additional_fte_needed: u32,
    pub status: CapacityStatus,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CertificationGap {
    pub certification: String,
    pub required_hours: f64,
    pub shift_count: usize,
    pub qualified_nurses: Vec<NurseId>,
    pub available_hours: f64,
    pub shortage_hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeniorityGap {
    pub level: SeniorityLevel,
    pub required_hours: f64,
    pub available_hours: f64,
    pub shortage_hours: f64,
    pub eligible_nurses: usize,
    /// Shifts no nurse of this level is qualified to take.
    pub uncovered_shifts: Vec<ShiftId>,
}

/// What a nurse needs to work every shift of a ward.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WardProfile {
    pub ward: String,
    pub certifications: BTreeSet<String>,
    pub min_level: SeniorityLevel,
}

impl WardProfile {
    /// Whether `nurse` may work every shift of the ward.
    pub fn fits(&self, nurse: &Nurse) -> bool {
        nurse.seniority >= self.min_level && nurse.holds_all(&self.certifications)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WardGap {
    pub profile: WardProfile,
    pub required_hours: f64,
    pub shift_count: usize,
    pub eligible_nurses: Vec<NurseId>,
    pub available_hours: f64,
    pub shortage_hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FatigueIssue {
    pub nurse_id: NurseId,
    pub fatigue_score: f64,
    pub level: FatigueLevel,
    pub capacity_factor: f64,
}

/// One day of approved leave inside the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOffEntry {
    pub nurse_id: NurseId,
    pub date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConflictKind {
    DailyCoverage,
    ConsecutiveLimit,
    RestPeriod,
    WardLoad,
    NightPreference,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DailyCoverage => "daily coverage",
            Self::ConsecutiveLimit => "consecutive limit",
            Self::RestPeriod => "rest period",
            Self::WardLoad => "ward load",
            Self::NightPreference => "night preference",
        };
        f.write_str(name)
    }
}

/// A hard rule that cannot hold even though head-count and skills suffice.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintConflict {
    pub kind: ConflictKind,
    pub severity: Severity,
    pub description: String,
    pub shifts: Vec<ShiftId>,
    pub remedies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    pub priority: Severity,
    pub message: String,
}

/// Everything the analyzer found, most urgent recommendation first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfeasibilityReport {
    pub period: Option<Period>,
    /// Status of the solve that triggered the analysis, if any.
    pub solve_status: Option<SolveStatus>,
    pub capacity: CapacityAnalysis,
    pub certification_gaps: Vec<CertificationGap>,
    pub seniority_gaps: Vec<SeniorityGap>,
    pub ward_gaps: Vec<WardGap>,
    pub fatigue_issues: Vec<FatigueIssue>,
    pub time_off: Vec<TimeOffEntry>,
    pub conflicts: Vec<ConstraintConflict>,
    pub recommendations: Vec<Recommendation>,
    pub summary: String,
}

impl InfeasibilityReport {
    /// True when head-count or skills fall short of demand.
    pub fn has_shortfall(&self) -> bool {
        self.capacity.is_understaffed
            || !self.certification_gaps.is_empty()
            || !self.seniority_gaps.is_empty()
            || !self.ward_gaps.is_empty()
    }

    /// Conflicts severe enough to block any roster on their own.
    pub fn blocking_conflicts(&self) -> impl Iterator<Item = &ConstraintConflict> {
        self.conflicts
            .iter()
            .filter(|c| matches!(c.severity, Severity::Critical | Severity::High))
    }

    pub fn certification_gap(&self, certification: &str) -> Option<&CertificationGap> {
        self.certification_gaps
            .iter()
            .find(|gap| gap.certification == certification)
    }

    pub fn ward_gap(&self, ward: &str) -> Option<&WardGap> {
        self.ward_gaps.iter().find(|gap| gap.profile.ward == ward)
    }

    pub fn seniority_gap(&self, level: SeniorityLevel) -> Option<&SeniorityGap> {
        self.seniority_gaps.iter().find(|gap| gap.level == level)
    }

    pub fn conflicts_of(&self, kind: ConflictKind) -> impl Iterator<Item = &ConstraintConflict> {
        self.conflicts.iter().filter(move |c| c.kind == kind)
    }
}
