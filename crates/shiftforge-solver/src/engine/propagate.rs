//! Bound propagation over linear boolean constraints with a trail for undo.
//!
//! For every constraint the state keeps the minimum activity (coefficients of
//! variables fixed to one) and the maximum activity (coefficients of variables
//! not fixed to zero). Assigning a variable updates both incrementally, and
//! undoing pops the trail back to a mark.

use std::collections::VecDeque;

use crate::model::{ConstraintModel, VarId};
use crate::objective::Objective;

/// Raised when the current partial assignment cannot be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Conflict;

pub(crate) struct PropagationState<'m> {
    model: &'m ConstraintModel,
    objective: &'m Objective,
    values: Vec<Option<bool>>,
    min_activity: Vec<i64>,
    max_activity: Vec<i64>,
    trail: Vec<VarId>,
    queue: VecDeque<u32>,
    queued: Vec<bool>,
    linear_value: i64,
    deviation_counts: Vec<i64>,
}

impl<'m> PropagationState<'m> {
    pub(crate) fn new(model: &'m ConstraintModel, objective: &'m Objective) -> Self {
        let constraints = model.constraints().len();
        Self {
            model,
            objective,
            values: vec![None; model.num_vars()],
            min_activity: vec![0; constraints],
            max_activity: model
                .constraints()
                .iter()
                .map(|c| c.max_activity())
                .collect(),
            trail: Vec::with_capacity(model.num_vars()),
            queue: VecDeque::with_capacity(constraints),
            queued: vec![false; constraints],
            linear_value: 0,
            deviation_counts: vec![0; objective.deviations().len()],
        }
    }

    /// Applies the model's fixings and propagates every constraint once.
    pub(crate) fn initialize(&mut self) -> Result<(), Conflict> {
        if self.model.contradiction().is_some() {
            return Err(Conflict);
        }
        for (var, value) in self.model.fixings() {
            self.assign(var, value)?;
        }
        for index in 0..self.model.constraints().len() {
            self.enqueue(index as u32);
        }
        self.propagate()
    }

    #[inline]
    pub(crate) fn value(&self, var: VarId) -> Option<bool> {
        self.values[var.index()]
    }

    pub(crate) fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Linear objective of the variables fixed to one.
    pub(crate) fn linear_value(&self) -> i64 {
        self.linear_value
    }

    pub(crate) fn deviation_count(&self, term: usize) -> i64 {
        self.deviation_counts[term]
    }

    /// Deviation excess already incurred by the current assignment.
    pub(crate) fn incurred_excess(&self) -> i64 {
        self.objective
            .deviations()
            .iter()
            .zip(&self.deviation_counts)
            .map(|(term, &count)| term.incurred_excess(count))
            .sum()
    }

    /// Objective value; exact once every variable is fixed.
    pub(crate) fn objective_value(&self) -> i64 {
        let deviation: i64 = self
            .objective
            .deviations()
            .iter()
            .zip(&self.deviation_counts)
            .map(|(term, &count)| term.penalty(count))
            .sum();
        self.linear_value + deviation
    }

    /// Complete assignment; unfixed variables read as false.
    pub(crate) fn snapshot(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.unwrap_or(false)).collect()
    }

    /// Fixes `var` and schedules the constraints it appears in.
    pub(crate) fn assign(&mut self, var: VarId, value: bool) -> Result<(), Conflict> {
        match self.values[var.index()] {
            Some(current) if current == value => return Ok(()),
            Some(_) => {
                self.clear_queue();
                return Err(Conflict);
            }
            None => {}
        }

        self.values[var.index()] = Some(value);
        self.trail.push(var);

        let model = self.model;
        for &(constraint, coef) in model.occurrences(var) {
            if value {
                self.min_activity[constraint as usize] += coef;
            } else {
                self.max_activity[constraint as usize] -= coef;
            }
            self.enqueue(constraint);
        }

        if value {
            self.linear_value += self.objective.coefficient(var);
            for &term in self.objective.deviations_of(var) {
                self.deviation_counts[term as usize] += 1;
            }
        }
        Ok(())
    }

    /// Runs queued constraints until no bound changes.
    pub(crate) fn propagate(&mut self) -> Result<(), Conflict> {
        let model = self.model;
        while let Some(index) = self.queue.pop_front() {
            self.queued[index as usize] = false;
            let constraint = model.constraint(index as usize);

            if constraint.relation.bounds_above() {
                let slack = constraint.rhs - self.min_activity[index as usize];
                if slack < 0 {
                    self.clear_queue();
                    return Err(Conflict);
                }
                for &(var, coef) in &constraint.terms {
                    if coef > slack && self.values[var.index()].is_none() {
                        self.assign(var, false)?;
                    }
                }
            }

            if constraint.relation.bounds_below() {
                let surplus = self.max_activity[index as usize] - constraint.rhs;
                if surplus < 0 {
                    self.clear_queue();
                    return Err(Conflict);
                }
                for &(var, coef) in &constraint.terms {
                    if coef > surplus && self.values[var.index()].is_none() {
                        self.assign(var, true)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Reverts every assignment made after the trail had length `mark`.
    pub(crate) fn undo_to(&mut self, mark: usize) {
        let model = self.model;
        while self.trail.len() > mark {
            let Some(var) = self.trail.pop() else { break };
            let Some(value) = self.values[var.index()].take() else {
                continue;
            };
            for &(constraint, coef) in model.occurrences(var) {
                if value {
                    self.min_activity[constraint as usize] -= coef;
                } else {
                    self.max_activity[constraint as usize] += coef;
                }
            }
            if value {
                self.linear_value -= self.objective.coefficient(var);
                for &term in self.objective.deviations_of(var) {
                    self.deviation_counts[term as usize] -= 1;
                }
            }
        }
    }

    fn enqueue(&mut self, constraint: u32) {
        if !self.queued[constraint as usize] {
            self.queued[constraint as usize] = true;
            self.queue.push_back(constraint);
        }
    }

    fn clear_queue(&mut self) {
        for index in self.queue.drain(..) {
            self.queued[index as usize] = false;
        }
    }
}
