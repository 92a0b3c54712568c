//! Translates nurses, shifts and rule settings into a [`ConstraintModel`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shiftforge_config::RuleConfig;
use shiftforge_core::{Nurse, Shift};
use tracing::debug;

use crate::model::{ConstraintModel, ConstraintTag, ModelStats, Relation, VarGrid, VarId};

/// A built model together with the layout needed to read solutions back.
#[derive(Debug, Clone)]
pub struct RosterModel {
    pub model: ConstraintModel,
    pub grid: VarGrid,
    /// Shift indices ordered by start time, then id.
    pub chronological: Vec<usize>,
}

impl RosterModel {
    pub fn stats(&self) -> ModelStats {
        self.model.stats()
    }
}

/// Builds the hard-constraint model for one roster horizon.
///
/// Constraints are installed in a fixed order: coverage, certification,
/// seniority, hours, minimum rest, maximum consecutive, senior coverage,
/// time off. Variables already fixed to zero are left out of the hours, rest
/// and consecutive constraints.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use shiftforge_config::RuleConfig;
/// use shiftforge_core::{ContractType, Nurse, SeniorityLevel, Shift};
/// use shiftforge_solver::builder::ModelBuilder;
///
/// let day = NaiveDate::from_ymd_opt(2025, 12, 8).unwrap();
/// let shifts = vec![Shift::new(
///     "s1",
///     "ICU",
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(16, 0, 0).unwrap(),
/// )];
/// let nurses = vec![Nurse::new("n1", SeniorityLevel::Senior, ContractType::FullTime)];
///
/// let built = ModelBuilder::new(&nurses, &shifts, &RuleConfig::default()).build();
/// assert_eq!(built.model.num_vars(), 1);
/// ```
pub struct ModelBuilder<'a> {
    nurses: &'a [Nurse],
    shifts: &'a [Shift],
    rules: &'a RuleConfig,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(nurses: &'a [Nurse], shifts: &'a [Shift], rules: &'a RuleConfig) -> Self {
        Self {
            nurses,
            shifts,
            rules,
        }
    }

    pub fn build(self) -> RosterModel {
        let grid = VarGrid::new(self.nurses.len(), self.shifts.len());
        let mut model = ConstraintModel::with_vars(grid.len());

        let mut chronological: Vec<usize> = (0..self.shifts.len()).collect();
        chronological.sort_by(|&a, &b| {
            let (a, b) = (&self.shifts[a], &self.shifts[b]);
            a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id))
        });

        self.add_coverage(&mut model, &grid);
        self.fix_unqualified(&mut model, &grid);
        self.add_hours(&mut model, &grid);
        let rest_pairs = self.add_minimum_rest(&mut model, &grid, &chronological);
        self.add_max_consecutive(&mut model, &grid);
        if self.rules.senior_coverage {
            self.add_senior_coverage(&mut model, &grid);
        }
        self.fix_time_off(&mut model, &grid);

        let stats = model.stats();
        debug!(
            event = "model_built",
            variables = stats.variables,
            fixed_to_zero = stats.fixed_to_zero,
            constraints = stats.constraint_count(),
            coverage = stats.count(ConstraintTag::Coverage),
            hours = stats.count(ConstraintTag::Hours),
            rest_pairs = rest_pairs,
            consecutive_windows = stats.count(ConstraintTag::MaxConsecutive),
            senior_coverage = stats.count(ConstraintTag::SeniorCoverage),
        );

        RosterModel {
            model,
            grid,
            chronological,
        }
    }

    fn add_coverage(&self, model: &mut ConstraintModel, grid: &VarGrid) {
        for s in 0..grid.shifts() {
            model.add_exactly_one(grid.shift_vars(s).collect(), ConstraintTag::Coverage);
        }
    }

    fn fix_unqualified(&self, model: &mut ConstraintModel, grid: &VarGrid) {
        for (n, nurse) in self.nurses.iter().enumerate() {
            for (s, shift) in self.shifts.iter().enumerate() {
                if !nurse.holds_all(&shift.required_certifications) {
                    model.fix(grid.var(n, s), false, ConstraintTag::Certification);
                } else if nurse.seniority < shift.min_level {
                    model.fix(grid.var(n, s), false, ConstraintTag::Seniority);
                }
            }
        }
    }

    fn add_hours(&self, model: &mut ConstraintModel, grid: &VarGrid) {
        for (n, nurse) in self.nurses.iter().enumerate() {
            let cap_minutes = i64::from(self.rules.contract_hours.cap(nurse.contract)) * 60;
            let terms: Vec<(VarId, i64)> = self
                .shifts
                .iter()
                .enumerate()
                .map(|(s, shift)| (grid.var(n, s), shift.duration_minutes()))
                .filter(|&(var, _)| !model.is_fixed_false(var))
                .collect();

            let total: i64 = terms.iter().map(|&(_, minutes)| minutes).sum();
            if total > cap_minutes {
                model.add_linear(terms, Relation::Le, cap_minutes, ConstraintTag::Hours);
            }
        }
    }

    /// Returns the number of conflicting shift pairs found.
    fn add_minimum_rest(
        &self,
        model: &mut ConstraintModel,
        grid: &VarGrid,
        chronological: &[usize],
    ) -> usize {
        let min_rest = self.rules.min_rest_minutes();
        let window = self.rules.rest_scan_window_minutes();
        let mut pairs = 0;

        for (pos, &i) in chronological.iter().enumerate() {
            let earlier = &self.shifts[i];
            for &j in &chronological[pos + 1..] {
                let later = &self.shifts[j];
                if (later.start - earlier.start).num_minutes() > window {
                    break;
                }
                if earlier.gap_minutes_until(later) >= min_rest {
                    continue;
                }
                pairs += 1;
                for n in 0..grid.nurses() {
                    let (a, b) = (grid.var(n, i), grid.var(n, j));
                    if !model.is_fixed_false(a) && !model.is_fixed_false(b) {
                        model.add_at_most_one_pair(a, b, ConstraintTag::MinimumRest);
                    }
                }
            }
        }
        pairs
    }

    fn add_max_consecutive(&self, model: &mut ConstraintModel, grid: &VarGrid) {
        let limit = self.rules.max_consecutive_shifts as usize;
        let mut by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (s, shift) in self.shifts.iter().enumerate() {
            by_date.entry(shift.date()).or_default().push(s);
        }
        let dates: Vec<NaiveDate> = by_date.keys().copied().collect();
        if limit == 0 || dates.len() <= limit {
            return;
        }

        for window in dates.windows(limit + 1) {
            // Sorted and distinct, so a span of exactly `limit` days means no gap.
            if (window[limit] - window[0]).num_days() != limit as i64 {
                continue;
            }
            let shifts: Vec<usize> = window
                .iter()
                .flat_map(|date| by_date[date].iter().copied())
                .collect();

            for n in 0..grid.nurses() {
                let terms: Vec<(VarId, i64)> = shifts
                    .iter()
                    .map(|&s| grid.var(n, s))
                    .filter(|&var| !model.is_fixed_false(var))
                    .map(|var| (var, 1))
                    .collect();
                if terms.len() > limit {
                    model.add_linear(
                        terms,
                        Relation::Le,
                        limit as i64,
                        ConstraintTag::MaxConsecutive,
                    );
                }
            }
        }
    }

    fn add_senior_coverage(&self, model: &mut ConstraintModel, grid: &VarGrid) {
        for (s, shift) in self.shifts.iter().enumerate() {
            let terms: Vec<(VarId, i64)> = self
                .nurses
                .iter()
                .enumerate()
                .filter(|(_, nurse)| nurse.is_senior() && shift.admits(nurse))
                .map(|(n, _)| (grid.var(n, s), 1))
                .collect();
            if terms.is_empty() {
                debug!(
                    event = "senior_coverage_unsatisfiable",
                    shift = %shift.id,
                    ward = %shift.ward,
                );
            }
            model.add_linear(terms, Relation::Ge, 1, ConstraintTag::SeniorCoverage);
        }
    }

    fn fix_time_off(&self, model: &mut ConstraintModel, grid: &VarGrid) {
        for (n, nurse) in self.nurses.iter().enumerate() {
            if nurse.preferences.time_off.is_empty() {
                continue;
            }
            for (s, shift) in self.shifts.iter().enumerate() {
                if nurse.is_off_on(shift.date()) {
                    model.fix(grid.var(n, s), false, ConstraintTag::TimeOff);
                }
            }
        }
    }
}
