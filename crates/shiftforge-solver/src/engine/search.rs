//! Depth-first branch-and-bound run by one worker.
//!
//! Branching picks the open exactly-one group with the fewest candidates and
//! tries its variables best marginal objective first. Variables outside every
//! group are branched on last, one at a time. Propagation runs after every
//! decision and undo goes through the trail.

use rand::Rng;
use shiftforge_core::StopReason;
use tracing::{debug, trace};

use super::incumbent::SharedIncumbent;
use super::propagate::PropagationState;
use crate::model::{ConstraintModel, VarId};
use crate::objective::Objective;
use crate::scope::SearchScope;
use crate::termination::Termination;

/// How one worker's search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WorkerOutcome {
    pub(crate) worker: usize,
    /// The whole tree was explored or pruned.
    pub(crate) exhausted: bool,
    /// Set when a termination fired; `None` if another worker finished first.
    pub(crate) stop: Option<StopReason>,
    pub(crate) nodes: u64,
}

enum Expansion {
    Leaf,
    Pruned,
    Branch(Vec<(VarId, bool)>),
}

struct Frame {
    decisions: Vec<(VarId, bool)>,
    next: usize,
    mark: usize,
}

pub(crate) struct Worker<'a, T: Termination> {
    model: &'a ConstraintModel,
    objective: &'a Objective,
    shared: &'a SharedIncumbent,
    termination: &'a T,
    scope: SearchScope,
    free_vars: Vec<VarId>,
}

impl<'a, T: Termination> Worker<'a, T> {
    pub(crate) fn new(
        model: &'a ConstraintModel,
        objective: &'a Objective,
        shared: &'a SharedIncumbent,
        termination: &'a T,
        scope: SearchScope,
    ) -> Self {
        let mut grouped = vec![false; model.num_vars()];
        for group in model.groups() {
            for var in group {
                grouped[var.index()] = true;
            }
        }
        let free_vars = (0..model.num_vars())
            .filter(|&i| !grouped[i])
            .map(VarId::new)
            .collect();

        Self {
            model,
            objective,
            shared,
            termination,
            scope,
            free_vars,
        }
    }

    pub(crate) fn run(mut self) -> WorkerOutcome {
        let model = self.model;
        let objective = self.objective;
        let mut state = PropagationState::new(model, objective);
        if state.initialize().is_err() {
            trace!(event = "root_conflict", worker = self.scope.worker());
            return self.finish();
        }

        let mut stack: Vec<Frame> = Vec::new();
        'search: loop {
            if self.shared.is_proved() {
                return self.stopped(None);
            }
            if let Some(reason) = self.termination.check(&self.scope) {
                return self.stopped(Some(reason));
            }
            self.scope.increment_node_count();

            match self.expand(&state) {
                Expansion::Leaf => self.record_leaf(&state),
                Expansion::Pruned => {}
                Expansion::Branch(decisions) => stack.push(Frame {
                    decisions,
                    next: 0,
                    mark: state.trail_len(),
                }),
            }

            // Move to the next child that survives propagation.
            loop {
                let Some(frame) = stack.last_mut() else {
                    return self.finish();
                };
                state.undo_to(frame.mark);
                if frame.next == frame.decisions.len() {
                    stack.pop();
                    continue;
                }
                let (var, value) = frame.decisions[frame.next];
                frame.next += 1;
                if state.assign(var, value).is_ok() && state.propagate().is_ok() {
                    continue 'search;
                }
            }
        }
    }

    fn expand(&mut self, state: &PropagationState<'_>) -> Expansion {
        let mut bound = state.linear_value() + state.incurred_excess();
        let mut chosen: Option<(usize, usize)> = None;

        for (index, group) in self.model.groups().iter().enumerate() {
            let mut open = 0;
            let mut best = i64::MIN;
            let mut covered = false;
            for &var in group {
                match state.value(var) {
                    Some(true) => {
                        covered = true;
                        break;
                    }
                    Some(false) => {}
                    None => {
                        open += 1;
                        best = best.max(self.objective.coefficient(var));
                    }
                }
            }
            if covered {
                continue;
            }
            if open == 0 {
                return Expansion::Pruned;
            }
            bound += best;
            if chosen.map_or(true, |(_, fewest)| open < fewest) {
                chosen = Some((index, open));
            }
        }

        let mut first_free = None;
        for &var in &self.free_vars {
            if state.value(var).is_none() {
                bound += self.objective.coefficient(var).max(0);
                first_free.get_or_insert(var);
            }
        }

        if let Some(best) = self.shared.best_objective() {
            if bound <= best {
                trace!(event = "prune", worker = self.scope.worker(), bound, best);
                return Expansion::Pruned;
            }
        }

        if let Some((group, _)) = chosen {
            return Expansion::Branch(self.order_candidates(state, group));
        }
        match first_free {
            Some(var) => {
                let preferred = self.objective.coefficient(var) > 0;
                Expansion::Branch(vec![(var, preferred), (var, !preferred)])
            }
            None => Expansion::Leaf,
        }
    }

    /// Open variables of a group, best marginal objective first.
    fn order_candidates(
        &mut self,
        state: &PropagationState<'_>,
        group: usize,
    ) -> Vec<(VarId, bool)> {
        let model = self.model;
        let objective = self.objective;
        let mut scored: Vec<(i64, u32, VarId)> = model.groups()[group]
            .iter()
            .filter(|&&var| state.value(var).is_none())
            .map(|&var| {
                let marginal: i64 = objective
                    .deviations_of(var)
                    .iter()
                    .map(|&term| {
                        let term = term as usize;
                        objective.deviations()[term].marginal(state.deviation_count(term))
                    })
                    .sum();
                let score = objective.coefficient(var) + marginal;
                (score, self.scope.rng().random::<u32>(), var)
            })
            .collect();
        scored.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        scored.into_iter().map(|(_, _, var)| (var, true)).collect()
    }

    fn record_leaf(&self, state: &PropagationState<'_>) {
        let value = state.objective_value();
        if self
            .shared
            .offer(value, self.scope.worker(), || state.snapshot())
        {
            debug!(
                event = "incumbent",
                worker = self.scope.worker(),
                objective = value,
                nodes = self.scope.node_count(),
                elapsed_ms = self.scope.elapsed().as_millis() as u64,
            );
        }
    }

    fn finish(self) -> WorkerOutcome {
        self.shared.mark_proved();
        WorkerOutcome {
            worker: self.scope.worker(),
            exhausted: true,
            stop: None,
            nodes: self.scope.node_count(),
        }
    }

    fn stopped(self, reason: Option<StopReason>) -> WorkerOutcome {
        WorkerOutcome {
            worker: self.scope.worker(),
            exhausted: false,
            stop: reason,
            nodes: self.scope.node_count(),
        }
    }
}
