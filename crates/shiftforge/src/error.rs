//! Error types for ShiftForge entry points

use shiftforge_analysis::SimulationError;
use shiftforge_config::ConfigError;
use shiftforge_core::InputError;
use thiserror::Error;

/// Failure of an engine call. Unschedulable horizons are not errors; they
/// come back as [`crate::GenerationOutcome::Unscheduled`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Result type alias for ShiftForge entry points
pub type Result<T> = std::result::Result<T, EngineError>;
