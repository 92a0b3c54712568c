//! Skill and seniority shortfalls, measured in hours.

use std::collections::{BTreeMap, BTreeSet};

use shiftforge_config::RuleConfig;
use shiftforge_core::{SeniorityLevel, Shift};

use super::Workforce;
use crate::report::{CertificationGap, SeniorityGap, WardGap, WardProfile};

/// Absorbs float noise when comparing summed hours.
const HOURS_EPSILON: f64 = 1e-9;

fn short_of(required: f64, available: f64) -> f64 {
    (required - available).max(0.0)
}

/// One gap per certification that nobody holds or whose holders lack the hours.
pub(super) fn certification_gaps(
    workforce: &Workforce<'_>,
    shifts: &[Shift],
) -> Vec<CertificationGap> {
    let mut demand: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for shift in shifts {
        for certification in &shift.required_certifications {
            let entry = demand.entry(certification.as_str()).or_default();
            entry.0 += shift.duration_hours();
            entry.1 += 1;
        }
    }

    demand
        .into_iter()
        .filter_map(|(certification, (required_hours, shift_count))| {
            let (qualified_nurses, available_hours) =
                workforce.matching(|nurse| nurse.holds(certification));
            let missing = qualified_nurses.is_empty()
                || available_hours + HOURS_EPSILON < required_hours;
            missing.then(|| CertificationGap {
                certification: certification.to_string(),
                required_hours,
                shift_count,
                qualified_nurses,
                available_hours,
                shortage_hours: short_of(required_hours, available_hours),
            })
        })
        .collect()
}

/// Senior and Mid demand against the nurses at or above each level.
///
/// With senior coverage enabled every shift needs senior hours, and a shift
/// with no qualified senior is reported as uncovered.
pub(super) fn seniority_gaps(
    workforce: &Workforce<'_>,
    shifts: &[Shift],
    rules: &RuleConfig,
) -> Vec<SeniorityGap> {
    [SeniorityLevel::Senior, SeniorityLevel::Mid]
        .into_iter()
        .filter_map(|level| {
            let needs_level = |shift: &Shift| {
                shift.min_level >= level || (level == SeniorityLevel::Senior && rules.senior_coverage)
            };
            let required_hours: f64 = shifts
                .iter()
                .filter(|shift| needs_level(*shift))
                .map(Shift::duration_hours)
                .sum();
            let (eligible, available_hours) = workforce.matching(|nurse| nurse.seniority >= level);

            let uncovered_shifts = if level == SeniorityLevel::Senior {
                shifts
                    .iter()
                    .filter(|shift| needs_level(*shift))
                    .filter(|shift| {
                        !workforce
                            .nurses
                            .iter()
                            .any(|nurse| nurse.is_senior() && shift.admits(nurse))
                    })
                    .map(|shift| shift.id.clone())
                    .collect()
            } else {
                Vec::new()
            };

            let short = available_hours + HOURS_EPSILON < required_hours;
            (short || !uncovered_shifts.is_empty()).then(|| SeniorityGap {
                level,
                required_hours,
                available_hours,
                shortage_hours: short_of(required_hours, available_hours),
                eligible_nurses: eligible.len(),
                uncovered_shifts,
            })
        })
        .collect()
}

/// Profile, demanded hours and shifts of every ward.
///
/// The profile takes the union of the shifts' certifications but the lowest
/// of their levels, so a nurse holding only part of a mixed ward's tags does not
/// count towards that ward. Senior coverage raises the level to Senior,
/// since no other nurse can be rostered then.
pub(super) fn ward_profiles<'s>(
    shifts: &'s [Shift],
    rules: &RuleConfig,
) -> BTreeMap<&'s str, (WardProfile, f64, Vec<&'s Shift>)> {
    let mut wards: BTreeMap<&str, (WardProfile, f64, Vec<&Shift>)> = BTreeMap::new();
    for shift in shifts {
        let entry = wards.entry(shift.ward.as_str()).or_insert_with(|| {
            (
                WardProfile {
                    ward: shift.ward.clone(),
                    certifications: BTreeSet::new(),
                    min_level: shift.min_level,
                },
                0.0,
                Vec::new(),
            )
        });
        entry
            .0
            .certifications
            .extend(shift.required_certifications.iter().cloned());
        entry.0.min_level = entry.0.min_level.min(shift.min_level);
        entry.1 += shift.duration_hours();
        entry.2.push(shift);
    }
    if rules.senior_coverage {
        for (profile, _, _) in wards.values_mut() {
            profile.min_level = SeniorityLevel::Senior;
        }
    }
    wards
}

pub(super) fn ward_gaps(
    workforce: &Workforce<'_>,
    shifts: &[Shift],
    rules: &RuleConfig,
) -> Vec<WardGap> {
    ward_profiles(shifts, rules)
        .into_values()
        .filter_map(|(profile, required_hours, ward_shifts)| {
            let (eligible_nurses, available_hours) = workforce.matching(|nurse| profile.fits(nurse));
            (available_hours + HOURS_EPSILON < required_hours).then(|| WardGap {
                profile,
                required_hours,
                shift_count: ward_shifts.len(),
                eligible_nurses,
                available_hours,
                shortage_hours: short_of(required_hours, available_hours),
            })
        })
        .collect()
}
