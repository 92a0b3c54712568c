//! Time-based termination.

use std::time::Duration;

use shiftforge_core::StopReason;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the solve has run for a time limit.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use shiftforge_solver::termination::TimeTermination;
///
/// let term = TimeTermination::new(Duration::from_secs(30));
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for TimeTermination {
    fn check(&self, scope: &SearchScope) -> Option<StopReason> {
        (scope.elapsed() >= self.limit).then_some(StopReason::TimeLimit)
    }
}
