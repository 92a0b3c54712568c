//! ShiftForge - Ward roster generation in Rust
//!
//! One call turns a team, a horizon of shifts and fatigue statistics into a
//! roster, or into a report explaining why no roster exists.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use shiftforge::prelude::*;
//! use shiftforge_test::scenarios::two_day_icu;
//!
//! let scenario = two_day_icu();
//! let config = EngineConfig::default()
//!     .with_time_limit(Duration::from_secs(2))
//!     .with_random_seed(7);
//!
//! let outcome = generate_roster(
//!     &scenario.nurses,
//!     &scenario.shifts,
//!     &scenario.stats,
//!     &config,
//!     &CancellationToken::new(),
//! )
//! .unwrap();
//!
//! let roster = outcome.roster().unwrap();
//! assert_eq!(roster.assignments.len(), 2);
//! ```

#[cfg(feature = "console")]
pub mod console;
mod engine;
mod error;

pub use engine::{generate_roster, simulate_staffing_change, GenerationOutcome};
pub use error::{EngineError, Result};

pub use shiftforge_analysis::{
    analyze, Analyzer, InfeasibilityReport, JobPosting, SimulatedChange, SimulationError,
    SimulationResult, StaffingAction,
};
pub use shiftforge_config::{ConfigError, EngineConfig, SolverConfig, WorkerCount};
pub use shiftforge_core::{
    Assignment, ContractType, InputError, Nurse, NurseId, NurseStat, NurseStats, Roster,
    SeniorityLevel, Shift, ShiftId, SolveStatus, StopReason, TimeOffRequest,
};
pub use shiftforge_solver::CancellationToken;

/// Lower-level building blocks, for callers that drive the solver directly.
pub mod solver {
    pub use shiftforge_solver::*;
}

/// Report types of the infeasibility analyzer.
pub mod report {
    pub use shiftforge_analysis::report::*;
}

pub mod prelude {
    pub use super::{generate_roster, simulate_staffing_change, GenerationOutcome};
    pub use super::{CancellationToken, EngineConfig, EngineError};
    pub use super::{ContractType, Nurse, NurseStats, SeniorityLevel, Shift, TimeOffRequest};
    pub use super::{InfeasibilityReport, SimulationResult, StaffingAction};
}
