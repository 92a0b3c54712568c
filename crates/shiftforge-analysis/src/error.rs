//! Error types for staffing simulation

use shiftforge_core::{InputError, NurseId, SeniorityLevel};
use thiserror::Error;

/// Simulation request rejected before any analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The nurse to promote is not part of the team
    #[error("Simulation error: unknown nurse {0}")]
    UnknownNurse(NurseId),

    /// The requested level is not above the nurse's current level
    #[error("Simulation error: nurse {nurse_id} is already {current}, cannot promote to {requested}")]
    NotAPromotion {
        nurse_id: NurseId,
        current: SeniorityLevel,
        requested: SeniorityLevel,
    },

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Result type alias for staffing simulation
pub type Result<T> = std::result::Result<T, SimulationError>;
