//! Rule conflicts that remain once head-count and skills are sufficient.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shiftforge_config::EngineConfig;
use shiftforge_core::{Period, Shift, ShiftId};

use super::gaps::ward_profiles;
use super::Workforce;
use crate::report::{ConflictKind, ConstraintConflict, Severity};

pub(super) fn detect(
    workforce: &Workforce<'_>,
    shifts: &[Shift],
    period: &Period,
    config: &EngineConfig,
) -> Vec<ConstraintConflict> {
    let mut conflicts = daily_coverage(workforce, shifts);
    conflicts.extend(consecutive_limit(workforce, shifts, period, config));
    conflicts.extend(rest_periods(workforce, shifts, config));
    conflicts.extend(ward_load(workforce, shifts, period, config));
    conflicts.extend(night_preference(workforce, shifts, period, config));
    conflicts
}

fn ids(shifts: &[&Shift]) -> Vec<ShiftId> {
    shifts.iter().map(|shift| shift.id.clone()).collect()
}

/// Most shifts one nurse can take over `period` at `per_week` a week, with a
/// partial week capped by its own length.
fn shifts_per_nurse(period: &Period, per_week: u32) -> u32 {
    let days = period.days().max(1);
    days / 7 * per_week + (days % 7).min(per_week)
}

/// Days with more shifts than rosterable nurses not on leave.
fn daily_coverage(workforce: &Workforce<'_>, shifts: &[Shift]) -> Vec<ConstraintConflict> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&Shift>> = BTreeMap::new();
    for shift in shifts {
        by_date.entry(shift.date()).or_default().push(shift);
    }

    by_date
        .into_iter()
        .filter_map(|(date, day_shifts)| {
            let available = workforce
                .nurses
                .iter()
                .filter(|nurse| workforce.rosterable(nurse) && !nurse.is_off_on(date))
                .count();
            (day_shifts.len() > available).then(|| ConstraintConflict {
                kind: ConflictKind::DailyCoverage,
                severity: Severity::Critical,
                description: format!(
                    "{date}: {} shifts but only {available} nurses who can be rostered are not on leave",
                    day_shifts.len()
                ),
                shifts: ids(&day_shifts),
                remedies: vec![
                    format!("Reschedule approved time off on {date}"),
                    format!("Bring in additional staff for {date}"),
                ],
            })
        })
        .collect()
}

/// Average daily demand above what the team can sustain without breaking
/// the consecutive-shift limit.
fn consecutive_limit(
    workforce: &Workforce<'_>,
    shifts: &[Shift],
    period: &Period,
    config: &EngineConfig,
) -> Option<ConstraintConflict> {
    let limit = config.rules.max_consecutive_shifts;
    let headcount = workforce
        .nurses
        .iter()
        .filter(|nurse| workforce.rosterable(nurse))
        .count();
    let days = period.days().max(1);
    let average = shifts.len() as f64 / f64::from(days);
    let sustainable = headcount as f64 * f64::from(limit) / f64::from(limit + 1);

    (days > limit && average > sustainable).then(|| ConstraintConflict {
        kind: ConflictKind::ConsecutiveLimit,
        severity: Severity::High,
        description: format!(
            "{average:.1} shifts per day on average, but {headcount} nurses limited to \
             {limit} consecutive shifts sustain only {sustainable:.1}"
        ),
        shifts: Vec::new(),
        remedies: vec![
            "Hire additional staff".to_string(),
            format!("Review the limit of {limit} consecutive shifts"),
        ],
    })
}

/// Shift pairs closer than the minimum rest. Critical when fewer than two
/// nurses could split the pair.
fn rest_periods(
    workforce: &Workforce<'_>,
    shifts: &[Shift],
    config: &EngineConfig,
) -> Vec<ConstraintConflict> {
    let min_rest = config.rules.min_rest_minutes();
    let window = config.rules.rest_scan_window_minutes();
    let mut ordered: Vec<&Shift> = shifts.iter().collect();
    ordered.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    let mut conflicts = Vec::new();
    for (i, first) in ordered.iter().enumerate() {
        for second in &ordered[i + 1..] {
            if (second.start - first.start).num_minutes() > window {
                break;
            }
            let gap = first.gap_minutes_until(second);
            if gap >= min_rest {
                continue;
            }

            let candidates = workforce
                .nurses
                .iter()
                .filter(|nurse| {
                    workforce.can_take(first, nurse) || workforce.can_take(second, nurse)
                })
                .count();
            let critical = candidates < 2;
            let spacing = if gap < 0 {
                "overlap".to_string()
            } else {
                format!("leave {:.1} h between them", gap as f64 / 60.0)
            };
            conflicts.push(ConstraintConflict {
                kind: ConflictKind::RestPeriod,
                severity: if critical { Severity::Critical } else { Severity::Low },
                description: format!(
                    "{} and {} {spacing}, below the {} h minimum rest; {candidates} nurses \
                     qualify for either",
                    first.id,
                    second.id,
                    config.rules.min_rest_hours
                ),
                shifts: vec![first.id.clone(), second.id.clone()],
                remedies: if critical {
                    vec![
                        format!("Qualify another nurse for ward {}", first.ward),
                        "Move one of the shifts".to_string(),
                    ]
                } else {
                    vec!["Give the two shifts to different nurses".to_string()]
                },
            });
        }
    }
    conflicts
}

/// Wards whose shift count exceeds what their qualified nurses can work at
/// the assumed weekly maximum.
fn ward_load(
    workforce: &Workforce<'_>,
    shifts: &[Shift],
    period: &Period,
    config: &EngineConfig,
) -> Vec<ConstraintConflict> {
    let per_nurse = shifts_per_nurse(period, config.analysis.assumed_max_shifts_per_week);
    ward_profiles(shifts, &config.rules)
        .into_values()
        .filter_map(|(profile, _, ward_shifts)| {
            let eligible = workforce
                .nurses
                .iter()
                .filter(|nurse| profile.fits(nurse))
                .count();
            let capacity = eligible * per_nurse as usize;
            (ward_shifts.len() > capacity).then(|| ConstraintConflict {
                kind: ConflictKind::WardLoad,
                severity: Severity::High,
                description: format!(
                    "Ward {} has {} shifts but its {eligible} qualified nurses can work \
                     at most {capacity}",
                    profile.ward,
                    ward_shifts.len()
                ),
                shifts: ids(&ward_shifts),
                remedies: vec![
                    format!("Cross-train staff for ward {}", profile.ward),
                    format!("Hire for ward {}", profile.ward),
                ],
            })
        })
        .collect()
}

/// Night shifts without enough qualified nurses willing to work nights.
fn night_preference(
    workforce: &Workforce<'_>,
    shifts: &[Shift],
    period: &Period,
    config: &EngineConfig,
) -> Option<ConstraintConflict> {
    let nights: Vec<&Shift> = shifts.iter().filter(|shift| shift.is_night()).collect();
    if nights.is_empty() {
        return None;
    }

    let willing = workforce
        .nurses
        .iter()
        .filter(|nurse| !nurse.preferences.avoid_night_shifts)
        .filter(|nurse| nights.iter().any(|shift| workforce.can_take(shift, nurse)))
        .count();
    let capacity =
        willing * shifts_per_nurse(period, config.analysis.assumed_max_shifts_per_week) as usize;

    // Night avoidance is a preference, so this never blocks on its own.
    let severity = if willing == 0 {
        Severity::Medium
    } else if nights.len() > capacity {
        Severity::Low
    } else {
        return None;
    };

    Some(ConstraintConflict {
        kind: ConflictKind::NightPreference,
        severity,
        description: format!(
            "{} night shifts but only {willing} qualified nurses are willing to work nights",
            nights.len()
        ),
        shifts: ids(&nights),
        remedies: vec![
            "Ask nurses who avoid nights to cover some of them".to_string(),
            "Hire night staff".to_string(),
        ],
    })
}
