//! Domain value objects.
//!
//! Everything here is an immutable snapshot supplied by (or returned to) the
//! orchestration layer. Nothing holds state between engine calls.

mod ids;
mod nurse;
mod period;
mod roster;
mod shift;
mod stats;

pub use ids::{NurseId, RosterId, ShiftId};
pub use nurse::{ContractType, Nurse, Preferences, SeniorityLevel, TimeOffRequest};
pub use period::Period;
pub use roster::{Assignment, Roster, RosterMetadata, SolveStatus, StopReason};
pub use shift::Shift;
pub use stats::{fatigue_of, FatigueLevel, NurseStat, NurseStats};

#[cfg(test)]
mod tests;
