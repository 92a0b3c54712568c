//! ShiftForge Core - Value types for ward rostering
//!
//! This crate provides the fundamental data model shared by the engine crates:
//! - Nurse and shift value objects, including preferences and time off
//! - Fatigue statistics supplied by an external tracker
//! - Roster and assignment types produced by a successful solve
//! - Input validation performed before any model is built

pub mod domain;
pub mod error;
pub mod validation;

pub use domain::{
    fatigue_of, Assignment, ContractType, FatigueLevel, Nurse, NurseId, NurseStat, NurseStats,
    Period, Preferences, Roster, RosterId, RosterMetadata, SeniorityLevel, Shift, ShiftId,
    SolveStatus, StopReason, TimeOffRequest,
};
pub use error::{InputError, ParseLevelError};
pub use validation::validate_inputs;
