//! Infeasibility analyzer.
//!
//! Explains an unschedulable horizon without solving anything: capacity,
//! skills and seniority are compared against demand first, and only when
//! they suffice does the analyzer look for individual rules that clash.
//! The analysis is a pure function of its inputs; every collection it
//! reports is ordered deterministically.

mod capacity;
mod conflicts;
mod gaps;
mod recommend;

use shiftforge_config::EngineConfig;
use shiftforge_core::{
    fatigue_of, FatigueLevel, Nurse, NurseId, NurseStats, Period, Shift, SolveStatus,
};
use tracing::info;

use crate::report::{FatigueIssue, InfeasibilityReport, TimeOffEntry};

/// Runs the analyzer with default options.
pub fn analyze(
    nurses: &[Nurse],
    shifts: &[Shift],
    stats: &NurseStats,
    config: &EngineConfig,
) -> InfeasibilityReport {
    Analyzer::new(config).analyze(nurses, shifts, stats)
}

/// Diagnoses why no roster satisfies the hard rules.
///
/// # Examples
///
/// ```
/// use shiftforge_analysis::Analyzer;
/// use shiftforge_config::EngineConfig;
/// use shiftforge_core::{NurseStats, SeniorityLevel};
/// use shiftforge_test::{nurse, shift};
///
/// let nurses = vec![nurse("n1", SeniorityLevel::Senior, &["BLS"])];
/// let shifts = vec![shift("icu", "ICU", 0, 8, 8).requiring(["ICU"])];
///
/// let config = EngineConfig::default();
/// let report = Analyzer::new(&config).analyze(&nurses, &shifts, &NurseStats::new());
/// let gap = report.certification_gap("ICU").unwrap();
/// assert!(gap.qualified_nurses.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer<'a> {
    config: &'a EngineConfig,
    solve_status: Option<SolveStatus>,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            solve_status: None,
        }
    }

    /// Records the status of the solve being explained; it shapes the summary.
    pub fn with_solve_status(mut self, status: SolveStatus) -> Self {
        self.solve_status = Some(status);
        self
    }

    pub fn analyze(
        &self,
        nurses: &[Nurse],
        shifts: &[Shift],
        stats: &NurseStats,
    ) -> InfeasibilityReport {
        let workforce = Workforce::new(nurses, stats, self.config);
        let period = Period::spanning(shifts);

        let mut report = InfeasibilityReport {
            period,
            solve_status: self.solve_status,
            capacity: capacity::analyze(&workforce, shifts, &self.config.analysis),
            certification_gaps: gaps::certification_gaps(&workforce, shifts),
            seniority_gaps: gaps::seniority_gaps(&workforce, shifts, &self.config.rules),
            ward_gaps: gaps::ward_gaps(&workforce, shifts, &self.config.rules),
            fatigue_issues: workforce.fatigue_issues(),
            time_off: period
                .map(|p| time_off_summary(nurses, &p))
                .unwrap_or_default(),
            conflicts: Vec::new(),
            recommendations: Vec::new(),
            summary: String::new(),
        };

        if !report.has_shortfall() {
            if let Some(period) = period {
                report.conflicts = conflicts::detect(&workforce, shifts, &period, self.config);
            }
        }
        report.recommendations = recommend::recommendations(&report);
        report.summary = recommend::summary(&report);

        info!(
            event = "analysis_end",
            shortfall = report.has_shortfall(),
            understaffed = report.capacity.is_understaffed,
            certification_gaps = report.certification_gaps.len(),
            seniority_gaps = report.seniority_gaps.len(),
            ward_gaps = report.ward_gaps.len(),
            conflicts = report.conflicts.len(),
            recommendations = report.recommendations.len(),
        );
        report
    }
}

/// Nurses with their fatigue-discounted capacity.
pub(crate) struct Workforce<'a> {
    pub(crate) nurses: &'a [Nurse],
    pub(crate) effective_hours: Vec<f64>,
    fatigue: Vec<(f64, FatigueLevel, f64)>,
    /// Senior coverage is on and every shift takes a single nurse, so only
    /// seniors are ever rostered.
    senior_only: bool,
}

impl<'a> Workforce<'a> {
    fn new(nurses: &'a [Nurse], stats: &NurseStats, config: &EngineConfig) -> Self {
        let fatigue: Vec<(f64, FatigueLevel, f64)> = nurses
            .iter()
            .map(|nurse| {
                let score = fatigue_of(stats, &nurse.id);
                let level = config.fatigue.level(score);
                (score, level, config.fatigue.capacity_factor(level))
            })
            .collect();
        let effective_hours = nurses
            .iter()
            .zip(&fatigue)
            .map(|(nurse, &(_, _, factor))| {
                f64::from(config.rules.contract_hours.cap(nurse.contract)) * factor
            })
            .collect();
        Self {
            nurses,
            effective_hours,
            fatigue,
            senior_only: config.rules.senior_coverage,
        }
    }

    pub(crate) fn rosterable(&self, nurse: &Nurse) -> bool {
        !self.senior_only || nurse.is_senior()
    }

    /// Whether `nurse` could be given `shift` in some roster.
    pub(crate) fn can_take(&self, shift: &Shift, nurse: &Nurse) -> bool {
        self.rosterable(nurse) && shift.admits(nurse)
    }

    /// Ids and summed effective hours of the nurses matching `pred`.
    pub(crate) fn matching(&self, pred: impl Fn(&Nurse) -> bool) -> (Vec<NurseId>, f64) {
        let mut ids = Vec::new();
        let mut hours = 0.0;
        for (nurse, effective) in self.nurses.iter().zip(&self.effective_hours) {
            if pred(nurse) {
                ids.push(nurse.id.clone());
                hours += effective;
            }
        }
        (ids, hours)
    }

    pub(crate) fn total_hours(&self) -> f64 {
        self.effective_hours.iter().sum()
    }

    fn fatigue_issues(&self) -> Vec<FatigueIssue> {
        self.nurses
            .iter()
            .zip(&self.fatigue)
            .filter(|(_, (_, level, _))| level.is_fatigued())
            .map(|(nurse, &(score, level, factor))| FatigueIssue {
                nurse_id: nurse.id.clone(),
                fatigue_score: score,
                level,
                capacity_factor: factor,
            })
            .collect()
    }
}

fn time_off_summary(nurses: &[Nurse], period: &Period) -> Vec<TimeOffEntry> {
    let mut entries = Vec::new();
    for nurse in nurses {
        for request in &nurse.preferences.time_off {
            let Some(overlap) = period.clamp(request.start, request.end) else {
                continue;
            };
            entries.extend(overlap.dates().map(|date| TimeOffEntry {
                nurse_id: nurse.id.clone(),
                date,
                reason: request.reason.clone(),
            }));
        }
    }
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.nurse_id.cmp(&b.nurse_id)));
    entries
}

#[cfg(test)]
mod tests;
