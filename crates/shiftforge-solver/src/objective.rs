//! Soft preferences, expressed as a maximised integer objective.
//!
//! Every variable carries a linear coefficient. Fairness terms that depend on
//! how many shifts a nurse ends up with are kept separately as
//! [`DeviationTerm`]s and evaluated on counts.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shiftforge_config::{FatigueConfig, ObjectiveWeights};
use shiftforge_core::{fatigue_of, FatigueLevel, Nurse, NurseStats, Shift};
use smallvec::SmallVec;

use crate::model::{VarGrid, VarId};

/// Which fairness rule a deviation term encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviationKind {
    FairShare,
    WeekendShare,
    NightShare,
}

/// Penalty on the distance between a count of true variables and a target.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationTerm {
    pub kind: DeviationKind,
    pub vars: Vec<VarId>,
    pub target: i64,
    pub excess_weight: i64,
    pub deficit_weight: i64,
}

impl DeviationTerm {
    /// Objective contribution (never positive) for `count` true variables.
    pub fn penalty(&self, count: i64) -> i64 {
        if count > self.target {
            -(count - self.target) * self.excess_weight
        } else {
            -(self.target - count) * self.deficit_weight
        }
    }

    /// Excess penalty already locked in by `count` true variables.
    pub fn incurred_excess(&self, count: i64) -> i64 {
        -(count - self.target).max(0) * self.excess_weight
    }

    /// Change in penalty when `count` grows by one.
    pub fn marginal(&self, count: i64) -> i64 {
        self.penalty(count + 1) - self.penalty(count)
    }
}

/// Linear coefficients plus deviation terms over the same variables.
#[derive(Debug, Clone, Default)]
pub struct Objective {
    linear: Vec<i64>,
    deviations: Vec<DeviationTerm>,
    membership: Vec<SmallVec<[u32; 3]>>,
}

impl Objective {
    /// An objective with the given linear coefficients and no deviation terms.
    pub fn linear(coefficients: Vec<i64>) -> Self {
        let membership = vec![SmallVec::new(); coefficients.len()];
        Self {
            linear: coefficients,
            deviations: Vec::new(),
            membership,
        }
    }

    pub fn add_deviation(&mut self, term: DeviationTerm) {
        let index = self.deviations.len() as u32;
        for var in &term.vars {
            self.membership[var.index()].push(index);
        }
        self.deviations.push(term);
    }

    #[inline]
    pub fn coefficient(&self, var: VarId) -> i64 {
        self.linear[var.index()]
    }

    pub fn deviations(&self) -> &[DeviationTerm] {
        &self.deviations
    }

    /// Indices of the deviation terms counting `var`.
    #[inline]
    pub fn deviations_of(&self, var: VarId) -> &[u32] {
        &self.membership[var.index()]
    }

    pub fn num_vars(&self) -> usize {
        self.linear.len()
    }

    /// Objective value of a complete assignment.
    pub fn evaluate(&self, values: &[bool]) -> i64 {
        let linear: i64 = self
            .linear
            .iter()
            .zip(values)
            .filter(|(_, value)| **value)
            .map(|(coef, _)| *coef)
            .sum();
        let deviation: i64 = self
            .deviations
            .iter()
            .map(|term| {
                let count = term.vars.iter().filter(|v| values[v.index()]).count() as i64;
                term.penalty(count)
            })
            .sum();
        linear + deviation
    }
}

/// Builds the roster objective from preferences, fatigue and fairness rules.
pub struct ObjectiveBuilder<'a> {
    nurses: &'a [Nurse],
    shifts: &'a [Shift],
    stats: &'a NurseStats,
    fatigue: &'a FatigueConfig,
    weights: &'a ObjectiveWeights,
    seed: u64,
}

impl<'a> ObjectiveBuilder<'a> {
    pub fn new(
        nurses: &'a [Nurse],
        shifts: &'a [Shift],
        stats: &'a NurseStats,
        fatigue: &'a FatigueConfig,
        weights: &'a ObjectiveWeights,
    ) -> Self {
        Self {
            nurses,
            shifts,
            stats,
            fatigue,
            weights,
            seed: 0,
        }
    }

    /// Seed of the per-variable tie-break.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self, grid: &VarGrid) -> Objective {
        let tie_break = self.weights.effective_tie_break();
        debug_assert!(self
            .weights
            .smallest_real_weight()
            .map_or(true, |min| tie_break < min));

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut linear = vec![0; grid.len()];
        for (n, nurse) in self.nurses.iter().enumerate() {
            let fatigue = self.fatigue.level(fatigue_of(self.stats, &nurse.id));
            for (s, shift) in self.shifts.iter().enumerate() {
                let mut coef = self.preference(nurse, fatigue, shift);
                if tie_break > 0 {
                    coef += rng.random_range(-tie_break..=tie_break);
                }
                linear[grid.var(n, s).index()] = coef;
            }
        }

        let mut objective = Objective::linear(linear);
        self.add_fair_share(&mut objective, grid);
        self.add_weekend_share(&mut objective, grid);
        self.add_night_share(&mut objective, grid);
        objective
    }

    fn preference(&self, nurse: &Nurse, fatigue: FatigueLevel, shift: &Shift) -> i64 {
        let w = self.weights;
        let mut coef = 0;
        if nurse.is_senior() {
            coef += w.senior_bonus;
        }
        match fatigue {
            FatigueLevel::High => coef -= w.high_fatigue_penalty,
            FatigueLevel::Moderate => coef -= w.moderate_fatigue_penalty,
            FatigueLevel::Normal => {}
        }
        if fatigue.is_fatigued() {
            if shift.is_weekend() {
                coef -= w.fatigued_weekend_penalty;
            }
            if shift.is_night() {
                coef -= w.fatigued_night_penalty;
            }
        }
        if nurse.preferences.avoid_night_shifts && shift.is_night() {
            coef -= w.avoided_night_penalty;
        }
        if nurse.preferences.preferred_days.contains(&shift.weekday()) {
            coef += w.preferred_day_bonus;
        }
        coef
    }

    fn add_fair_share(&self, objective: &mut Objective, grid: &VarGrid) {
        if self.nurses.is_empty() {
            return;
        }
        let target = (self.shifts.len() / self.nurses.len()) as i64;
        for n in 0..self.nurses.len() {
            objective.add_deviation(DeviationTerm {
                kind: DeviationKind::FairShare,
                vars: grid.nurse_vars(n).collect(),
                target,
                excess_weight: self.weights.fair_share_excess_penalty,
                deficit_weight: self.weights.fair_share_deficit_penalty,
            });
        }
    }

    fn add_weekend_share(&self, objective: &mut Objective, grid: &VarGrid) {
        let weekend: Vec<usize> = (0..self.shifts.len())
            .filter(|&s| self.shifts[s].is_weekend())
            .collect();
        if weekend.is_empty() || self.nurses.is_empty() {
            return;
        }
        let target = ((weekend.len() / self.nurses.len()) as i64).max(1);
        for n in 0..self.nurses.len() {
            objective.add_deviation(DeviationTerm {
                kind: DeviationKind::WeekendShare,
                vars: weekend.iter().map(|&s| grid.var(n, s)).collect(),
                target,
                excess_weight: self.weights.weekend_excess_penalty,
                deficit_weight: 0,
            });
        }
    }

    fn add_night_share(&self, objective: &mut Objective, grid: &VarGrid) {
        let nights: Vec<usize> = (0..self.shifts.len())
            .filter(|&s| self.shifts[s].is_night())
            .collect();
        let willing: Vec<usize> = (0..self.nurses.len())
            .filter(|&n| !self.nurses[n].preferences.avoid_night_shifts)
            .collect();
        if nights.is_empty() || willing.is_empty() {
            return;
        }
        let target = ((nights.len() / willing.len()) as i64).max(1);
        for n in willing {
            objective.add_deviation(DeviationTerm {
                kind: DeviationKind::NightShare,
                vars: nights.iter().map(|&s| grid.var(n, s)).collect(),
                target,
                excess_weight: self.weights.night_excess_penalty,
                deficit_weight: 0,
            });
        }
    }
}

#[cfg(test)]
mod tests;
