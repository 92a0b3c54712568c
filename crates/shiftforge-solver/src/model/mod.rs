//! Boolean linear constraint model.
//!
//! The model is deliberately small: boolean variables, linear constraints with
//! non-negative integer coefficients, fixed values, and exactly-one groups that
//! the search engine branches on. Everything roster specific lives in
//! [`crate::builder`].

mod grid;

use std::collections::BTreeMap;
use std::fmt;

use smallvec::SmallVec;

pub use grid::VarGrid;

/// Index of a boolean decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(u32);

impl VarId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Comparison between a constraint's activity and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Le,
    Ge,
    Eq,
}

impl Relation {
    pub fn bounds_above(self) -> bool {
        matches!(self, Relation::Le | Relation::Eq)
    }

    pub fn bounds_below(self) -> bool {
        matches!(self, Relation::Ge | Relation::Eq)
    }
}

/// The hard rule that installed a constraint or fixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintTag {
    Coverage,
    Certification,
    Seniority,
    Hours,
    MinimumRest,
    MaxConsecutive,
    SeniorCoverage,
    TimeOff,
}

impl ConstraintTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintTag::Coverage => "coverage",
            ConstraintTag::Certification => "certification",
            ConstraintTag::Seniority => "seniority",
            ConstraintTag::Hours => "hours",
            ConstraintTag::MinimumRest => "minimum_rest",
            ConstraintTag::MaxConsecutive => "max_consecutive",
            ConstraintTag::SeniorCoverage => "senior_coverage",
            ConstraintTag::TimeOff => "time_off",
        }
    }
}

impl fmt::Display for ConstraintTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Σ coef·x  (≤ | ≥ | =)  rhs` over boolean variables.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub terms: SmallVec<[(VarId, i64); 8]>,
    pub relation: Relation,
    pub rhs: i64,
    pub tag: ConstraintTag,
}

impl LinearConstraint {
    /// Sum of all coefficients.
    pub fn max_activity(&self) -> i64 {
        self.terms.iter().map(|&(_, coef)| coef).sum()
    }

    /// Whether the constraint holds for a complete assignment.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let activity: i64 = self
            .terms
            .iter()
            .filter(|(var, _)| values[var.index()])
            .map(|&(_, coef)| coef)
            .sum();
        match self.relation {
            Relation::Le => activity <= self.rhs,
            Relation::Ge => activity >= self.rhs,
            Relation::Eq => activity == self.rhs,
        }
    }
}

/// Size summary of a built model, per installing rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub variables: usize,
    pub fixed_to_zero: usize,
    pub fixed_to_one: usize,
    pub constraints: BTreeMap<ConstraintTag, usize>,
}

impl ModelStats {
    pub fn constraint_count(&self) -> usize {
        self.constraints.values().sum()
    }

    pub fn count(&self, tag: ConstraintTag) -> usize {
        self.constraints.get(&tag).copied().unwrap_or(0)
    }
}

/// A boolean linear model ready for search.
#[derive(Debug, Clone, Default)]
pub struct ConstraintModel {
    num_vars: usize,
    fixed: Vec<Option<bool>>,
    fix_tags: Vec<Option<ConstraintTag>>,
    /// Set when two fixings disagree on a variable.
    contradiction: Option<VarId>,
    constraints: Vec<LinearConstraint>,
    occurrences: Vec<SmallVec<[(u32, i64); 4]>>,
    groups: Vec<Vec<VarId>>,
}

impl ConstraintModel {
    /// Creates a model with `num_vars` free boolean variables.
    pub fn with_vars(num_vars: usize) -> Self {
        Self {
            num_vars,
            fixed: vec![None; num_vars],
            fix_tags: vec![None; num_vars],
            contradiction: None,
            constraints: Vec::new(),
            occurrences: vec![SmallVec::new(); num_vars],
            groups: Vec::new(),
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Fixes a variable before search starts.
    ///
    /// Fixing a variable twice to the same value is a no-op; fixing it to the
    /// opposite value makes the model unsatisfiable.
    pub fn fix(&mut self, var: VarId, value: bool, tag: ConstraintTag) {
        match self.fixed[var.index()] {
            Some(existing) if existing != value => {
                self.contradiction.get_or_insert(var);
            }
            Some(_) => {}
            None => {
                self.fixed[var.index()] = Some(value);
                self.fix_tags[var.index()] = Some(tag);
            }
        }
    }

    pub fn fixed_value(&self, var: VarId) -> Option<bool> {
        self.fixed[var.index()]
    }

    pub fn is_fixed_false(&self, var: VarId) -> bool {
        self.fixed[var.index()] == Some(false)
    }

    /// Variables fixed before search, in index order.
    pub fn fixings(&self) -> impl Iterator<Item = (VarId, bool)> + '_ {
        self.fixed
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| value.map(|v| (VarId::new(idx), v)))
    }

    pub fn contradiction(&self) -> Option<VarId> {
        self.contradiction
    }

    /// Adds `Σ coef·x relation rhs`.
    ///
    /// Zero coefficients are dropped. Coefficients must be non-negative.
    pub fn add_linear<I>(&mut self, terms: I, relation: Relation, rhs: i64, tag: ConstraintTag)
    where
        I: IntoIterator<Item = (VarId, i64)>,
    {
        let terms: SmallVec<[(VarId, i64); 8]> =
            terms.into_iter().filter(|&(_, coef)| coef != 0).collect();
        debug_assert!(terms.iter().all(|&(_, coef)| coef > 0));

        let index = self.constraints.len() as u32;
        for &(var, coef) in &terms {
            self.occurrences[var.index()].push((index, coef));
        }
        self.constraints.push(LinearConstraint {
            terms,
            relation,
            rhs,
            tag,
        });
    }

    /// Adds `a + b ≤ 1`.
    pub fn add_at_most_one_pair(&mut self, a: VarId, b: VarId, tag: ConstraintTag) {
        self.add_linear([(a, 1), (b, 1)], Relation::Le, 1, tag);
    }

    /// Adds `Σ vars = 1` and registers the variables as a branching group.
    pub fn add_exactly_one(&mut self, vars: Vec<VarId>, tag: ConstraintTag) {
        self.add_linear(vars.iter().map(|&v| (v, 1)), Relation::Eq, 1, tag);
        self.groups.push(vars);
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn constraint(&self, index: usize) -> &LinearConstraint {
        &self.constraints[index]
    }

    /// Constraints mentioning `var`, with its coefficient in each.
    pub fn occurrences(&self, var: VarId) -> &[(u32, i64)] {
        &self.occurrences[var.index()]
    }

    /// Exactly-one groups in installation order.
    pub fn groups(&self) -> &[Vec<VarId>] {
        &self.groups
    }

    /// Checks a complete assignment against every fixing and constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.num_vars
            && self.contradiction.is_none()
            && self.fixings().all(|(var, value)| values[var.index()] == value)
            && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }

    pub fn stats(&self) -> ModelStats {
        let mut stats = ModelStats {
            variables: self.num_vars,
            ..ModelStats::default()
        };
        for value in self.fixed.iter().flatten() {
            if *value {
                stats.fixed_to_one += 1;
            } else {
                stats.fixed_to_zero += 1;
            }
        }
        for constraint in &self.constraints {
            *stats.constraints.entry(constraint.tag).or_default() += 1;
        }
        stats
    }

    /// Number of variables fixed by the given rule.
    pub fn fixed_by(&self, tag: ConstraintTag) -> usize {
        self.fix_tags.iter().filter(|t| **t == Some(tag)).count()
    }
}
