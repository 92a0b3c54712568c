//! Node-count termination.

use shiftforge_core::StopReason;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates a worker after it has expanded a number of search nodes.
///
/// The limit applies to each worker separately.
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    /// A termination that never fires.
    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }
}

impl Termination for NodeCountTermination {
    fn check(&self, scope: &SearchScope) -> Option<StopReason> {
        (scope.node_count() >= self.limit).then_some(StopReason::NodeLimit)
    }
}
