//! Best solution shared by all workers of one solve.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

const NO_INCUMBENT: i64 = i64::MIN;

#[derive(Debug, Clone)]
pub(crate) struct Incumbent {
    pub(crate) objective: i64,
    pub(crate) values: Vec<bool>,
    pub(crate) worker: usize,
}

/// Incumbent plus its objective mirrored in an atomic for lock-free pruning.
#[derive(Debug)]
pub(crate) struct SharedIncumbent {
    best_objective: AtomicI64,
    best: Mutex<Option<Incumbent>>,
    proved: AtomicBool,
}

impl SharedIncumbent {
    pub(crate) fn new() -> Self {
        Self {
            best_objective: AtomicI64::new(NO_INCUMBENT),
            best: Mutex::new(None),
            proved: AtomicBool::new(false),
        }
    }

    pub(crate) fn best_objective(&self) -> Option<i64> {
        let value = self.best_objective.load(Ordering::Acquire);
        (value != NO_INCUMBENT).then_some(value)
    }

    /// Stores the solution if it beats the current incumbent.
    pub(crate) fn offer(
        &self,
        objective: i64,
        worker: usize,
        values: impl FnOnce() -> Vec<bool>,
    ) -> bool {
        if self
            .best_objective()
            .is_some_and(|best| best >= objective)
        {
            return false;
        }

        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        if best.as_ref().is_some_and(|inc| inc.objective >= objective) {
            return false;
        }
        *best = Some(Incumbent {
            objective,
            values: values(),
            worker,
        });
        self.best_objective.store(objective, Ordering::Release);
        true
    }

    /// Records that some worker exhausted its tree.
    pub(crate) fn mark_proved(&self) {
        self.proved.store(true, Ordering::Release);
    }

    pub(crate) fn is_proved(&self) -> bool {
        self.proved.load(Ordering::Acquire)
    }

    pub(crate) fn into_best(self) -> Option<Incumbent> {
        self.best
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
