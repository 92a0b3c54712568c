//! What-if staffing simulation.
//!
//! A simulation applies a hire or promotion to a copy of the team and runs
//! the analyzer before and after. Hires are synthesized from the gaps the
//! analyzer reports, in order: ward gaps, then seniority gaps left after those
//! hires, then any capacity shortfall left after both.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use shiftforge_config::EngineConfig;
use shiftforge_core::{
    validate_inputs, ContractType, Nurse, NurseId, NurseStat, NurseStats, SeniorityLevel, Shift,
    ShiftId,
};
use tracing::{debug, info};

use crate::analyzer::Analyzer;
use crate::error::{Result, SimulationError};
use crate::report::InfeasibilityReport;

/// Change to simulate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaffingAction {
    /// Hire whatever the analyzer's gaps call for.
    Hire,
    Promote {
        nurse_id: NurseId,
        new_level: SeniorityLevel,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimulatedChange {
    Hire { nurse: Nurse, reason: String },
    Promotion {
        nurse_id: NurseId,
        from: SeniorityLevel,
        to: SeniorityLevel,
    },
}

/// Positions to advertise for one hiring profile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobPosting {
    /// `None` for general positions not tied to one ward.
    pub ward: Option<String>,
    pub certifications: BTreeSet<String>,
    pub level: SeniorityLevel,
    pub positions: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    pub action: StaffingAction,
    pub before: InfeasibilityReport,
    pub after: InfeasibilityReport,
    pub changes: Vec<SimulatedChange>,
    pub job_postings: Vec<JobPosting>,
    /// The after report shows no capacity, skill or seniority gap.
    pub success: bool,
}

impl SimulationResult {
    pub fn hires(&self) -> impl Iterator<Item = &Nurse> {
        self.changes.iter().filter_map(|change| match change {
            SimulatedChange::Hire { nurse, .. } => Some(nurse),
            SimulatedChange::Promotion { .. } => None,
        })
    }
}

/// Simulates `action` against the team without touching the inputs.
///
/// # Examples
///
/// ```
/// use shiftforge_analysis::{simulate, StaffingAction};
/// use shiftforge_config::EngineConfig;
/// use shiftforge_test::scenarios::missing_certification;
///
/// let scenario = missing_certification();
/// let result = simulate(
///     &scenario.nurses,
///     &scenario.shifts,
///     &scenario.stats,
///     &StaffingAction::Hire,
///     &EngineConfig::default(),
/// )
/// .unwrap();
/// assert!(result.success);
/// assert_eq!(result.hires().count(), 1);
/// ```
pub fn simulate(
    nurses: &[Nurse],
    shifts: &[Shift],
    stats: &NurseStats,
    action: &StaffingAction,
    config: &EngineConfig,
) -> Result<SimulationResult> {
    validate_inputs(nurses, shifts)?;

    let analyzer = Analyzer::new(config);
    let before = analyzer.analyze(nurses, shifts, stats);

    let mut plan = Plan::new(nurses, stats, config);
    match action {
        StaffingAction::Promote {
            nurse_id,
            new_level,
        } => plan.promote(nurse_id, *new_level)?,
        StaffingAction::Hire => {
            plan.hire_for_wards(&before);
            let interim = analyzer.analyze(&plan.team, shifts, &plan.stats);
            plan.hire_for_seniority(&interim, shifts);
            let interim = analyzer.analyze(&plan.team, shifts, &plan.stats);
            plan.hire_for_capacity(&interim, shifts);
        }
    }

    let after = analyzer.analyze(&plan.team, shifts, &plan.stats);
    let success = !after.has_shortfall();
    info!(
        event = "simulation_end",
        action = ?action,
        changes = plan.changes.len(),
        success,
        gaps_before = gap_count(&before),
        gaps_after = gap_count(&after),
    );

    Ok(SimulationResult {
        action: action.clone(),
        before,
        after,
        changes: plan.changes,
        job_postings: plan
            .postings
            .into_iter()
            .map(|((ward, certifications, level), positions)| JobPosting {
                ward,
                certifications,
                level,
                positions,
            })
            .collect(),
        success,
    })
}

fn gap_count(report: &InfeasibilityReport) -> usize {
    usize::from(report.capacity.is_understaffed)
        + report.certification_gaps.len()
        + report.seniority_gaps.len()
        + report.ward_gaps.len()
}

type PostingKey = (Option<String>, BTreeSet<String>, SeniorityLevel);

/// Working copy of the team with the changes applied so far.
struct Plan {
    team: Vec<Nurse>,
    stats: NurseStats,
    taken: HashSet<NurseId>,
    standard_hours: f64,
    next_hire: usize,
    changes: Vec<SimulatedChange>,
    postings: BTreeMap<PostingKey, u32>,
}

impl Plan {
    fn new(nurses: &[Nurse], stats: &NurseStats, config: &EngineConfig) -> Self {
        Self {
            team: nurses.to_vec(),
            stats: stats.clone(),
            taken: nurses.iter().map(|nurse| nurse.id.clone()).collect(),
            standard_hours: f64::from(config.analysis.standard_full_time_hours.max(1)),
            next_hire: 1,
            changes: Vec::new(),
            postings: BTreeMap::new(),
        }
    }

    fn promote(&mut self, nurse_id: &NurseId, new_level: SeniorityLevel) -> Result<()> {
        let nurse = self
            .team
            .iter_mut()
            .find(|nurse| &nurse.id == nurse_id)
            .ok_or_else(|| SimulationError::UnknownNurse(nurse_id.clone()))?;
        if new_level <= nurse.seniority {
            return Err(SimulationError::NotAPromotion {
                nurse_id: nurse_id.clone(),
                current: nurse.seniority,
                requested: new_level,
            });
        }

        self.changes.push(SimulatedChange::Promotion {
            nurse_id: nurse_id.clone(),
            from: nurse.seniority,
            to: new_level,
        });
        nurse.seniority = new_level;
        Ok(())
    }

    /// Full-time positions needed to cover `shortage_hours`, at least one.
    fn positions_for(&self, shortage_hours: f64) -> u32 {
        ((shortage_hours / self.standard_hours).ceil() as u32).max(1)
    }

    fn hire_for_wards(&mut self, report: &InfeasibilityReport) {
        for gap in &report.ward_gaps {
            let count = self.positions_for(gap.shortage_hours);
            let reason = format!(
                "Ward {} short by {:.1} h",
                gap.profile.ward, gap.shortage_hours
            );
            self.hire(
                Some(gap.profile.ward.clone()),
                &gap.profile.certifications,
                gap.profile.min_level,
                count,
                &reason,
            );
        }
    }

    fn hire_for_seniority(&mut self, report: &InfeasibilityReport, shifts: &[Shift]) {
        for gap in &report.seniority_gaps {
            let uncovered: Vec<&Shift> = shifts
                .iter()
                .filter(|shift| gap.uncovered_shifts.contains(&shift.id))
                .collect();
            let mut certifications: BTreeSet<String> = uncovered
                .iter()
                .flat_map(|shift| shift.required_certifications.iter().cloned())
                .collect();
            if certifications.is_empty() {
                certifications.extend(most_demanded_certification(shifts));
            }
            let wards: BTreeSet<&str> = uncovered.iter().map(|shift| shift.ward.as_str()).collect();
            let ward = match wards.len() {
                1 => wards.first().map(|ward| ward.to_string()),
                _ => None,
            };

            let count = self.positions_for(gap.shortage_hours);
            let reason = if gap.uncovered_shifts.is_empty() {
                format!("{} coverage short by {:.1} h", gap.level, gap.shortage_hours)
            } else {
                format!(
                    "No {} nurse qualified for {}",
                    gap.level,
                    join_ids(&gap.uncovered_shifts)
                )
            };
            self.hire(ward, &certifications, gap.level, count, &reason);
        }
    }

    fn hire_for_capacity(&mut self, report: &InfeasibilityReport, shifts: &[Shift]) {
        let capacity = &report.capacity;
        if !capacity.is_understaffed {
            return;
        }
        let certifications: BTreeSet<String> =
            most_demanded_certification(shifts).into_iter().collect();
        let reason = format!("Team capacity short by {:.1} h", capacity.shortage_hours);
        self.hire(
            None,
            &certifications,
            SeniorityLevel::Mid,
            capacity.additional_fte_needed.max(1),
            &reason,
        );
    }

    fn hire(
        &mut self,
        ward: Option<String>,
        certifications: &BTreeSet<String>,
        level: SeniorityLevel,
        count: u32,
        reason: &str,
    ) {
        for _ in 0..count {
            let id = self.fresh_id();
            let nurse = Nurse::new(id.clone(), level, ContractType::FullTime)
                .with_name(format!("Simulated hire {id}"))
                .with_certifications(certifications.iter().cloned());
            debug!(event = "simulated_hire", nurse = %id, level = %level, reason);

            self.stats.insert(id, NurseStat::new(0.0));
            self.team.push(nurse.clone());
            self.changes.push(SimulatedChange::Hire {
                nurse,
                reason: reason.to_string(),
            });
        }
        *self
            .postings
            .entry((ward, certifications.clone(), level))
            .or_default() += count;
    }

    /// Next `sim_hire_<n>` id not already used by the team.
    fn fresh_id(&mut self) -> NurseId {
        loop {
            let id = NurseId::new(format!("sim_hire_{}", self.next_hire));
            self.next_hire += 1;
            if self.taken.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Certification with the most demanded shift hours; ties go to the first tag
/// in sort order.
fn most_demanded_certification(shifts: &[Shift]) -> Option<String> {
    let mut hours: BTreeMap<&str, f64> = BTreeMap::new();
    for shift in shifts {
        for certification in &shift.required_certifications {
            *hours.entry(certification.as_str()).or_default() += shift.duration_hours();
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (certification, demand) in hours {
        if best.map_or(true, |(_, top)| demand > top) {
            best = Some((certification, demand));
        }
    }
    best.map(|(certification, _)| certification.to_string())
}

fn join_ids(ids: &[ShiftId]) -> String {
    ids.iter()
        .map(ShiftId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
