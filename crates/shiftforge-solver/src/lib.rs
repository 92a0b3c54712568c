//! ShiftForge Solver - Roster model construction and search
//!
//! This crate turns nurses and shifts into a boolean constraint model and
//! searches it:
//! - Generic linear boolean model with exactly-one branching groups
//! - Model builder installing the ward's hard rules
//! - Objective builder for preferences, fatigue and fairness
//! - Parallel branch-and-bound engine with bound propagation
//! - Termination conditions and cooperative cancellation
//! - Materialization of a solution into a roster

pub mod builder;
pub mod cancel;
pub mod engine;
pub mod materialize;
pub mod model;
pub mod objective;
pub mod scope;
pub mod termination;

pub use builder::{ModelBuilder, RosterModel};
pub use cancel::CancellationToken;
pub use engine::{resolve_seed, SolveOutcome, SolveStats, SolverEngine};
pub use materialize::materialize;
pub use model::{ConstraintModel, ConstraintTag, ModelStats, VarGrid, VarId};
pub use objective::{DeviationKind, DeviationTerm, Objective, ObjectiveBuilder};
pub use scope::SearchScope;
pub use termination::{
    ExternalTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};
