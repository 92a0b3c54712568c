use super::*;
use crate::report::{CapacityStatus, ConflictKind, Severity};
use chrono::Duration;
use shiftforge_core::{SeniorityLevel, ShiftId, StopReason, TimeOffRequest};
use shiftforge_test::scenarios::{
    back_to_back, missing_certification, sole_nurse_week, two_day_icu, whole_horizon_leave,
};
use shiftforge_test::{nurse, shift, ward_team, week_template, Scenario};

fn run(scenario: &Scenario) -> InfeasibilityReport {
    analyze(
        &scenario.nurses,
        &scenario.shifts,
        &scenario.stats,
        &EngineConfig::default(),
    )
}

#[test]
fn test_missing_certification_names_the_tag() {
    let report = run(&missing_certification());

    let gap = report.certification_gap("ICU").unwrap();
    assert!(gap.qualified_nurses.is_empty());
    assert_eq!(gap.shift_count, 1);
    assert_eq!(gap.shortage_hours, 8.0);

    let senior = report.seniority_gap(SeniorityLevel::Senior).unwrap();
    assert_eq!(senior.uncovered_shifts, vec![ShiftId::from("icu-mon-08")]);
    assert!(report.seniority_gap(SeniorityLevel::Mid).is_none());
    assert!(report.ward_gap("ICU").is_some());
    assert!(report.conflicts.is_empty());
}

#[test]
fn test_sole_nurse_is_understaffed() {
    let report = run(&sole_nurse_week());

    let capacity = &report.capacity;
    assert!(capacity.is_understaffed);
    assert_eq!(capacity.required_hours, 56.0);
    assert_eq!(capacity.available_hours, 40.0);
    assert_eq!(capacity.shortage_hours, 16.0);
    assert_eq!(capacity.additional_fte_needed, 1);
    assert_eq!(capacity.status, CapacityStatus::Critical);

    // shortfalls suppress the conflict pass
    assert!(report.has_shortfall());
    assert!(report.conflicts.is_empty());
    assert_eq!(report.recommendations[0].priority, Severity::Critical);
    assert!(report.summary.contains("16.0 h short"));
}

#[test]
fn test_leave_over_whole_horizon_blocks_daily_coverage() {
    let report = run(&whole_horizon_leave());

    assert!(!report.has_shortfall());
    let daily: Vec<_> = report.conflicts_of(ConflictKind::DailyCoverage).collect();
    assert_eq!(daily.len(), 2);
    assert!(daily.iter().all(|c| c.severity == Severity::Critical));
    assert_eq!(daily[0].shifts, vec![ShiftId::from("icu-mon")]);

    assert_eq!(report.time_off.len(), 2);
    assert!(report.time_off[0].date < report.time_off[1].date);
    assert_eq!(report.time_off[0].reason, "Annual leave");
}

#[test]
fn test_back_to_back_shifts_conflict_on_rest() {
    let report = run(&back_to_back());

    let rest: Vec<_> = report.conflicts_of(ConflictKind::RestPeriod).collect();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].severity, Severity::Critical);
    assert_eq!(
        rest[0].shifts,
        vec![ShiftId::from("icu-day"), ShiftId::from("icu-eve")]
    );
    assert!(report.blocking_conflicts().count() >= 1);
}

#[test]
fn test_rest_conflict_with_spare_staff_is_low() {
    let mut scenario = back_to_back();
    scenario
        .nurses
        .push(nurse("n2", SeniorityLevel::Senior, &["ICU"]));
    let report = run(&scenario);

    let rest: Vec<_> = report.conflicts_of(ConflictKind::RestPeriod).collect();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].severity, Severity::Low);
}

#[test]
fn test_rest_conflict_ignores_nurses_who_cannot_be_rostered() {
    let mut scenario = back_to_back();
    scenario
        .nurses
        .push(nurse("jun", SeniorityLevel::Junior, &["ICU"]));

    let report = run(&scenario);
    assert!(!report.has_shortfall());
    let rest: Vec<_> = report.conflicts_of(ConflictKind::RestPeriod).collect();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].severity, Severity::Critical);
    assert!(rest[0].description.contains("1 nurses qualify"));

    // without senior coverage the junior can take the second shift
    let config = EngineConfig::default().with_senior_coverage(false);
    let report = analyze(&scenario.nurses, &scenario.shifts, &scenario.stats, &config);
    let rest: Vec<_> = report.conflicts_of(ConflictKind::RestPeriod).collect();
    assert_eq!(rest[0].severity, Severity::Low);
}

#[test]
fn test_daily_coverage_counts_only_seniors_under_coverage() {
    let nurses = vec![
        nurse("sen", SeniorityLevel::Senior, &[]),
        nurse("jun", SeniorityLevel::Junior, &[]),
    ];
    let shifts = vec![shift("a", "General", 0, 6, 8), shift("b", "General", 0, 14, 8)];
    let report = run(&Scenario::new(nurses, shifts));

    let daily: Vec<_> = report.conflicts_of(ConflictKind::DailyCoverage).collect();
    assert_eq!(daily.len(), 1);
    assert!(daily[0].description.contains("only 1 nurses"));
}

#[test]
fn test_one_day_rota_has_no_blocking_conflicts() {
    let nurses = (1..=3)
        .map(|i| nurse(&format!("sen{i}"), SeniorityLevel::Senior, &["ICU"]))
        .collect();
    let shifts = (1..=3)
        .map(|i| shift(&format!("icu-{i}"), "ICU", 0, 8, 8).requiring(["ICU"]))
        .collect();
    let report = run(&Scenario::new(nurses, shifts));

    assert!(!report.has_shortfall());
    assert_eq!(report.conflicts_of(ConflictKind::WardLoad).count(), 0);
    assert_eq!(report.blocking_conflicts().count(), 0);
}

#[test]
fn test_ward_load_over_a_full_week() {
    let nurses = vec![nurse("sen", SeniorityLevel::Senior, &[])];
    let shifts: Vec<_> = (0..7)
        .map(|d| shift(&format!("s{d}"), "General", d, 8, 4))
        .collect();
    let config = EngineConfig::default().with_senior_coverage(false);
    let report = analyze(&nurses, &shifts, &NurseStats::new(), &config);

    assert!(!report.has_shortfall());
    let load: Vec<_> = report.conflicts_of(ConflictKind::WardLoad).collect();
    assert_eq!(load.len(), 1);
    assert!(load[0].description.contains("can work at most 5"));
}

#[test]
fn test_ward_profile_level_under_coverage() {
    let shifts = vec![shift("a", "ICU", 0, 8, 8).requiring(["ICU"])];
    let nurses = vec![nurse("jun", SeniorityLevel::Junior, &["ICU"])];
    let stats = NurseStats::new();

    let on = analyze(&nurses, &shifts, &stats, &EngineConfig::default());
    let gap = on.ward_gap("ICU").unwrap();
    assert_eq!(gap.profile.min_level, SeniorityLevel::Senior);
    assert!(gap.eligible_nurses.is_empty());

    let config = EngineConfig::default().with_senior_coverage(false);
    let off = analyze(&nurses, &shifts, &stats, &config);
    assert!(off.ward_gap("ICU").is_none());
}

#[test]
fn test_time_off_is_clamped_to_horizon() {
    let mut scenario = two_day_icu();
    let first = scenario.shifts[0].date();
    scenario.nurses[0] = scenario.nurses[0].clone().with_time_off(TimeOffRequest::new(
        first - Duration::days(3650),
        first + Duration::days(3650),
        "Secondment",
    ));

    let report = run(&scenario);
    assert_eq!(report.time_off.len(), 2);
    assert_eq!(report.time_off[0].date, first);
    assert!(report.time_off.iter().all(|entry| entry.reason == "Secondment"));
}

#[test]
fn test_fatigue_discounts_capacity() {
    let report = run(&two_day_icu().with_fatigue("n1", 0.9));

    assert_eq!(report.capacity.available_hours, 60.0);
    assert_eq!(report.fatigue_issues.len(), 1);
    let issue = &report.fatigue_issues[0];
    assert_eq!(issue.nurse_id, NurseId::from("n1"));
    assert_eq!(issue.level, FatigueLevel::High);
    assert_eq!(issue.capacity_factor, 0.5);
}

#[test]
fn test_tight_capacity_is_a_warning() {
    let nurses = vec![nurse("n1", SeniorityLevel::Senior, &[])];
    let shifts: Vec<_> = (0..4)
        .map(|d| shift(&format!("s{d}"), "General", d, 8, 9))
        .collect();
    let report = run(&Scenario::new(nurses, shifts));

    assert!(!report.capacity.is_understaffed);
    assert_eq!(report.capacity.status, CapacityStatus::Warning);
    assert_eq!(report.capacity.additional_fte_needed, 0);
}

#[test]
fn test_senior_coverage_switch() {
    let nurses = vec![
        nurse("m1", SeniorityLevel::Mid, &[]),
        nurse("m2", SeniorityLevel::Mid, &[]),
    ];
    let shifts = vec![shift("a", "General", 0, 8, 8), shift("b", "General", 1, 8, 8)];
    let stats = NurseStats::new();

    let on = analyze(&nurses, &shifts, &stats, &EngineConfig::default());
    let gap = on.seniority_gap(SeniorityLevel::Senior).unwrap();
    assert_eq!(gap.eligible_nurses, 0);
    assert_eq!(gap.uncovered_shifts.len(), 2);

    let config = EngineConfig::default().with_senior_coverage(false);
    let off = analyze(&nurses, &shifts, &stats, &config);
    assert!(off.seniority_gaps.is_empty());
    assert!(!off.has_shortfall());
}

#[test]
fn test_no_shifts() {
    let report = run(&Scenario::new(vec![nurse("n1", SeniorityLevel::Mid, &[])], vec![]));

    assert!(report.period.is_none());
    assert_eq!(report.capacity.coverage_ratio, 1.0);
    assert_eq!(report.capacity.status, CapacityStatus::Ok);
    assert!(!report.has_shortfall());
    assert!(report.conflicts.is_empty());
    assert!(!report.summary.is_empty());
}

#[test]
fn test_staffed_week_has_no_blocking_findings() {
    let report = run(&Scenario::new(ward_team(), week_template(7)));

    assert!(!report.has_shortfall());
    assert_eq!(report.blocking_conflicts().count(), 0);
    assert!(report
        .recommendations
        .iter()
        .all(|r| r.priority > Severity::High));
}

#[test]
fn test_report_is_deterministic() {
    let scenario = Scenario::new(ward_team(), week_template(7))
        .with_fatigue("sen01", 0.6)
        .with_fatigue("mid02", 0.95);

    assert_eq!(run(&scenario), run(&scenario));
}

#[test]
fn test_recommendations_most_urgent_first() {
    let report = run(&missing_certification().with_fatigue("n1", 0.6));

    let priorities: Vec<_> = report.recommendations.iter().map(|r| r.priority).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
    assert_eq!(priorities.last(), Some(&Severity::Medium));
}

#[test]
fn test_summary_reports_early_stop() {
    let scenario = two_day_icu();
    let config = EngineConfig::default();
    let report = Analyzer::new(&config)
        .with_solve_status(SolveStatus::Unknown(StopReason::TimeLimit))
        .analyze(&scenario.nurses, &scenario.shifts, &scenario.stats);

    assert_eq!(
        report.solve_status,
        Some(SolveStatus::Unknown(StopReason::TimeLimit))
    );
    assert!(report.summary.contains("time limit reached"));
    assert!(report.summary.contains("No structural cause"));
}
