//! ShiftForge Analysis - Diagnosis of unschedulable horizons
//!
//! This crate explains why no roster exists and what would change that:
//! - Capacity, certification, seniority and ward gaps measured in hours
//! - Rule conflicts that remain when head-count and skills suffice
//! - Prioritized recommendations and a one-line summary
//! - What-if simulation of hires and promotions
//!
//! Nothing here solves the constraint model; the analyzer works directly on
//! nurses, shifts and fatigue statistics.

pub mod analyzer;
pub mod error;
pub mod report;
pub mod simulator;

pub use analyzer::{analyze, Analyzer};
pub use error::SimulationError;
pub use report::{
    CapacityAnalysis, CapacityStatus, CertificationGap, ConflictKind, ConstraintConflict,
    FatigueIssue, InfeasibilityReport, Recommendation, SeniorityGap, Severity, TimeOffEntry,
    WardGap, WardProfile,
};
pub use simulator::{simulate, JobPosting, SimulatedChange, SimulationResult, StaffingAction};
