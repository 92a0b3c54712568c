//! Termination conditions for the search workers.

mod composite;
mod external;
mod node_count;
mod time;

use std::fmt::Debug;

use shiftforge_core::StopReason;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Trait for determining when a worker must stop searching.
///
/// Terminations are shared by every worker of a solve, so they must be
/// `Sync` and keep no per-worker state.
pub trait Termination: Send + Sync + Debug {
    /// Returns the reason to stop, or `None` to keep searching.
    fn check(&self, scope: &SearchScope) -> Option<StopReason>;

    /// Returns true if searching should stop.
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.check(scope).is_some()
    }
}

#[cfg(test)]
mod tests;
