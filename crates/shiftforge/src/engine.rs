//! Engine entry points that hide all internal wiring.

use shiftforge_analysis::{simulate, Analyzer, InfeasibilityReport, SimulationResult, StaffingAction};
use shiftforge_config::EngineConfig;
use shiftforge_core::{validate_inputs, InputError, Nurse, NurseStats, Roster, Shift, SolveStatus};
use shiftforge_solver::{
    materialize, resolve_seed, CancellationToken, ModelBuilder, ObjectiveBuilder, SolverEngine,
};
use tracing::info;

use crate::error::Result;

/// What a generation call produced.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// A roster satisfying every hard rule.
    Scheduled(Roster),
    /// No roster was found; `status` tells a proof of infeasibility apart
    /// from an early stop.
    Unscheduled {
        status: SolveStatus,
        report: InfeasibilityReport,
    },
}

impl GenerationOutcome {
    pub fn roster(&self) -> Option<&Roster> {
        match self {
            Self::Scheduled(roster) => Some(roster),
            Self::Unscheduled { .. } => None,
        }
    }

    pub fn report(&self) -> Option<&InfeasibilityReport> {
        match self {
            Self::Scheduled(_) => None,
            Self::Unscheduled { report, .. } => Some(report),
        }
    }

    pub fn status(&self) -> SolveStatus {
        match self {
            Self::Scheduled(roster) => roster.status,
            Self::Unscheduled { status, .. } => *status,
        }
    }
}

/// Builds and solves the roster model for one horizon.
///
/// When the search ends without a roster the infeasibility analyzer runs on
/// the same inputs and its report is returned in place of a roster.
pub fn generate_roster(
    nurses: &[Nurse],
    shifts: &[Shift],
    stats: &NurseStats,
    config: &EngineConfig,
    cancel: &CancellationToken,
) -> Result<GenerationOutcome> {
    config.validate()?;
    validate_inputs(nurses, shifts)?;

    let seed = resolve_seed(&config.solver);
    let built = ModelBuilder::new(nurses, shifts, &config.rules).build();
    let objective = ObjectiveBuilder::new(nurses, shifts, stats, &config.fatigue, &config.weights)
        .with_seed(seed)
        .build(&built.grid);
    let outcome = SolverEngine::new(config.solver.clone())
        .with_seed(seed)
        .solve(&built.model, &objective, cancel);

    if let (true, Some(values), Some(value)) =
        (outcome.is_success(), &outcome.values, outcome.objective)
    {
        let roster = materialize(nurses, shifts, &built.grid, values, value, outcome.status)
            .ok_or(InputError::NoShifts)?;
        info!(
            event = "roster_generated",
            roster = %roster.id,
            assignments = roster.len(),
            status = %outcome.status,
            objective = value,
        );
        return Ok(GenerationOutcome::Scheduled(roster));
    }

    let report = Analyzer::new(config)
        .with_solve_status(outcome.status)
        .analyze(nurses, shifts, stats);
    Ok(GenerationOutcome::Unscheduled {
        status: outcome.status,
        report,
    })
}

/// Runs a what-if hire or promotion against the team.
pub fn simulate_staffing_change(
    nurses: &[Nurse],
    shifts: &[Shift],
    stats: &NurseStats,
    action: &StaffingAction,
    config: &EngineConfig,
) -> Result<SimulationResult> {
    config.validate()?;
    Ok(simulate(nurses, shifts, stats, action, config)?)
}
