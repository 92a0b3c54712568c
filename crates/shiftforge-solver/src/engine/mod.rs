//! Parallel branch-and-bound over a [`ConstraintModel`].
//!
//! Every worker runs the same complete search with its own seed and shares
//! the incumbent with the others, so a good solution found by one worker
//! prunes the trees of all of them. The first worker to exhaust its tree
//! proves the result for everybody.

mod incumbent;
mod propagate;
mod search;

use std::time::{Duration, Instant};

use rayon::prelude::*;
use shiftforge_config::SolverConfig;
use shiftforge_core::{SolveStatus, StopReason};
use tracing::{info, warn};

use crate::cancel::CancellationToken;
use crate::model::ConstraintModel;
use crate::objective::Objective;
use crate::scope::SearchScope;
use crate::termination::{
    ExternalTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};

use incumbent::SharedIncumbent;
use search::{Worker, WorkerOutcome};

/// Search effort of one solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveStats {
    pub nodes: u64,
    pub workers: usize,
    pub seed: u64,
    pub duration: Duration,
}

/// Result of [`SolverEngine::solve`].
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Value of every variable in the best solution, when one was found.
    pub values: Option<Vec<bool>>,
    pub objective: Option<i64>,
    pub stats: SolveStats,
}

impl SolveOutcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Draws the seed for a run when the configuration leaves it open.
pub fn resolve_seed(config: &SolverConfig) -> u64 {
    config.random_seed.unwrap_or_else(rand::random)
}

/// Runs the search described by a [`SolverConfig`].
///
/// # Examples
///
/// ```
/// use shiftforge_config::SolverConfig;
/// use shiftforge_core::SolveStatus;
/// use shiftforge_solver::model::{ConstraintModel, ConstraintTag, VarId};
/// use shiftforge_solver::objective::Objective;
/// use shiftforge_solver::{CancellationToken, SolverEngine};
///
/// let mut model = ConstraintModel::with_vars(2);
/// model.add_exactly_one(vec![VarId::new(0), VarId::new(1)], ConstraintTag::Coverage);
/// let objective = Objective::linear(vec![1, 5]);
///
/// let outcome = SolverEngine::new(SolverConfig::default())
///     .with_seed(3)
///     .solve(&model, &objective, &CancellationToken::new());
/// assert_eq!(outcome.status, SolveStatus::Optimal);
/// assert_eq!(outcome.values, Some(vec![false, true]));
/// ```
#[derive(Debug, Clone)]
pub struct SolverEngine {
    config: SolverConfig,
    seed: Option<u64>,
}

impl SolverEngine {
    pub fn new(config: SolverConfig) -> Self {
        Self { config, seed: None }
    }

    /// Overrides the configured seed, e.g. with one already used elsewhere in
    /// the same call.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn solve(
        &self,
        model: &ConstraintModel,
        objective: &Objective,
        cancel: &CancellationToken,
    ) -> SolveOutcome {
        let started_at = Instant::now();
        let seed = self.seed.unwrap_or_else(|| resolve_seed(&self.config));
        let workers = self.config.worker_count.resolve();
        let termination = OrTermination::new((
            ExternalTermination::new(cancel.clone()),
            TimeTermination::new(self.config.time_limit()),
            self.config
                .node_limit
                .map_or_else(NodeCountTermination::unlimited, NodeCountTermination::new),
        ));

        info!(
            event = "solve_start",
            variables = model.num_vars(),
            constraints = model.constraints().len(),
            workers,
            seed,
            time_limit_ms = self.config.time_limit_ms,
        );

        let shared = SharedIncumbent::new();
        let outcomes = run_workers(model, objective, &shared, &termination, workers, seed, started_at);
        let nodes = outcomes.iter().map(|o| o.nodes).sum();
        let proved = outcomes.iter().any(|o| o.exhausted);
        let stop = outcomes
            .iter()
            .filter_map(|o| o.stop)
            .min_by_key(|reason| match reason {
                StopReason::Cancelled => 0,
                StopReason::TimeLimit => 1,
                StopReason::NodeLimit => 2,
            })
            .unwrap_or(StopReason::TimeLimit);

        let best = shared.into_best();
        let status = match (proved, best.is_some()) {
            (true, true) => SolveStatus::Optimal,
            (true, false) => SolveStatus::Infeasible,
            (false, true) => SolveStatus::Feasible,
            (false, false) => SolveStatus::Unknown(stop),
        };

        let duration = started_at.elapsed();
        let objective_value = best.as_ref().map(|inc| inc.objective);
        info!(
            event = "solve_end",
            status = %status,
            objective = ?objective_value,
            found_by = ?best.as_ref().map(|inc| inc.worker),
            nodes,
            duration_ms = duration.as_millis() as u64,
        );

        SolveOutcome {
            status,
            values: best.map(|inc| inc.values),
            objective: objective_value,
            stats: SolveStats {
                nodes,
                workers: outcomes.len(),
                seed,
                duration,
            },
        }
    }
}

fn run_workers<T: Termination>(
    model: &ConstraintModel,
    objective: &Objective,
    shared: &SharedIncumbent,
    termination: &T,
    workers: usize,
    seed: u64,
    started_at: Instant,
) -> Vec<WorkerOutcome> {
    let run = |worker: usize| {
        let scope = SearchScope::new(worker, seed.wrapping_add(worker as u64), started_at);
        Worker::new(model, objective, shared, termination, scope).run()
    };

    if workers <= 1 {
        return vec![run(0)];
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("shiftforge-worker-{i}"))
        .build()
    {
        Ok(pool) => pool.install(|| (0..workers).into_par_iter().map(&run).collect()),
        Err(err) => {
            warn!(event = "worker_pool_unavailable", error = %err, workers);
            vec![run(0)]
        }
    }
}
