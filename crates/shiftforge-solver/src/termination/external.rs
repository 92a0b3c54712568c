//! External termination via a cancellation token.

use shiftforge_core::StopReason;

use super::Termination;
use crate::cancel::CancellationToken;
use crate::scope::SearchScope;

/// Terminates when the caller cancels the solve.
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    token: CancellationToken,
}

impl ExternalTermination {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }
}

impl Termination for ExternalTermination {
    fn check(&self, _scope: &SearchScope) -> Option<StopReason> {
        self.token.is_cancelled().then_some(StopReason::Cancelled)
    }
}
