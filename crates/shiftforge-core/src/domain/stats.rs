//! Fatigue statistics supplied by the history tracker.

use std::collections::HashMap;

use super::NurseId;

/// Rolling fatigue metric for one nurse, consumed read-only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NurseStat {
    /// 0.0 = fresh, 1.0 = burnout risk.
    pub fatigue_score: f64,
}

impl NurseStat {
    pub fn new(fatigue_score: f64) -> Self {
        Self { fatigue_score }
    }

    /// Fatigue score clamped into `[0, 1]`; NaN reads as fresh.
    pub fn fatigue(&self) -> f64 {
        if self.fatigue_score.is_nan() {
            0.0
        } else {
            self.fatigue_score.clamp(0.0, 1.0)
        }
    }
}

/// Fatigue statistics keyed by nurse. Missing nurses are treated as fresh.
pub type NurseStats = HashMap<NurseId, NurseStat>;

/// Bucketed fatigue used by both the objective and the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FatigueLevel {
    Normal,
    Moderate,
    High,
}

impl FatigueLevel {
    /// Classifies a score against the moderate and high thresholds.
    pub fn classify(score: f64, moderate_threshold: f64, high_threshold: f64) -> Self {
        if score >= high_threshold {
            Self::High
        } else if score >= moderate_threshold {
            Self::Moderate
        } else {
            Self::Normal
        }
    }

    pub fn is_fatigued(self) -> bool {
        self != Self::Normal
    }
}

/// Looks up the clamped fatigue score of `nurse`, defaulting to 0.
pub fn fatigue_of(stats: &NurseStats, nurse: &NurseId) -> f64 {
    stats.get(nurse).map(NurseStat::fatigue).unwrap_or(0.0)
}
