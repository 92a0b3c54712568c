//! End-to-end roster generation.

use std::collections::HashMap;
use std::time::Duration;

use shiftforge::prelude::*;
use shiftforge::report::{ConflictKind, Severity};
use shiftforge::{analyze, NurseId, SolveStatus, StopReason, WorkerCount};
use shiftforge_test::scenarios::{
    back_to_back, missing_certification, sole_nurse_week, two_day_icu, whole_horizon_leave,
};
use shiftforge_test::{day, nurse, shift, ward_team, week_template, Scenario};

fn config() -> EngineConfig {
    EngineConfig::default()
        .with_time_limit(Duration::from_secs(5))
        .with_random_seed(42)
        .with_worker_count(WorkerCount::Count(2))
}

fn generate(scenario: &Scenario) -> GenerationOutcome {
    generate_roster(
        &scenario.nurses,
        &scenario.shifts,
        &scenario.stats,
        &config(),
        &CancellationToken::new(),
    )
    .unwrap()
}

fn unscheduled(outcome: GenerationOutcome) -> (SolveStatus, InfeasibilityReport) {
    match outcome {
        GenerationOutcome::Unscheduled { status, report } => (status, report),
        GenerationOutcome::Scheduled(roster) => panic!("unexpected roster {roster:?}"),
    }
}

#[test]
fn test_feasible_rota_is_scheduled() {
    let scenario = two_day_icu();
    let outcome = generate(&scenario);

    let roster = outcome.roster().unwrap();
    assert_eq!(roster.status, SolveStatus::Optimal);
    assert_eq!(roster.assignments.len(), 2);
    assert_eq!(roster.period.start, day(0));
    assert_eq!(roster.period.end, day(1));
    assert_eq!(roster.metadata.compliance_status, "Pending");
    assert_eq!(roster.metadata.empathy_score, 0.0);
    assert!(roster.id.as_str().starts_with("roster_"));
    // fair share keeps one shift per nurse
    assert_ne!(roster.assignments[0].nurse_id, roster.assignments[1].nurse_id);
}

#[test]
fn test_missing_certification_is_unscheduled() {
    let (status, report) = unscheduled(generate(&missing_certification()));

    assert_eq!(status, SolveStatus::Infeasible);
    assert_eq!(report.solve_status, Some(SolveStatus::Infeasible));
    let gap = report.certification_gap("ICU").unwrap();
    assert!(gap.qualified_nurses.is_empty());
}

#[test]
fn test_sole_nurse_week_is_understaffed() {
    let (status, report) = unscheduled(generate(&sole_nurse_week()));

    assert_eq!(status, SolveStatus::Infeasible);
    assert!(report.capacity.is_understaffed);
    assert!(report.capacity.shortage_hours > 0.0);
}

#[test]
fn test_leave_blocks_the_only_nurse() {
    let (status, report) = unscheduled(generate(&whole_horizon_leave()));

    assert_eq!(status, SolveStatus::Infeasible);
    let dates: Vec<_> = report.time_off.iter().map(|entry| entry.date).collect();
    assert_eq!(dates, vec![day(0), day(1)]);
    assert_eq!(report.conflicts_of(ConflictKind::DailyCoverage).count(), 2);
}

#[test]
fn test_back_to_back_shifts_need_rest() {
    let (status, report) = unscheduled(generate(&back_to_back()));

    assert_eq!(status, SolveStatus::Infeasible);
    let rest = report
        .conflicts_of(ConflictKind::RestPeriod)
        .next()
        .unwrap();
    let named: Vec<_> = rest.shifts.iter().map(|id| id.as_str()).collect();
    assert_eq!(named, vec!["icu-day", "icu-eve"]);
}

#[test]
fn test_junior_cannot_relieve_back_to_back_senior() {
    let mut scenario = back_to_back();
    scenario
        .nurses
        .push(nurse("jun", SeniorityLevel::Junior, &["ICU"]));
    let (status, report) = unscheduled(generate(&scenario));

    assert_eq!(status, SolveStatus::Infeasible);
    assert!(!report.has_shortfall());
    let rest = report
        .conflicts_of(ConflictKind::RestPeriod)
        .next()
        .unwrap();
    assert_eq!(rest.severity, Severity::Critical);
    assert!(report.blocking_conflicts().count() >= 1);
}

#[test]
fn test_scheduled_one_day_rota_has_clean_analysis() {
    let scenario = Scenario::new(
        (1..=3)
            .map(|i| nurse(&format!("sen{i}"), SeniorityLevel::Senior, &["ICU"]))
            .collect(),
        (1..=3)
            .map(|i| shift(&format!("icu-{i}"), "ICU", 0, 8, 8).requiring(["ICU"]))
            .collect(),
    );
    assert!(generate(&scenario).roster().is_some());

    let report = analyze(
        &scenario.nurses,
        &scenario.shifts,
        &scenario.stats,
        &config(),
    );
    assert_eq!(report.blocking_conflicts().count(), 0);
}

#[test]
fn test_cancelled_call_reports_unknown() {
    let scenario = two_day_icu();
    let token = CancellationToken::new();
    token.cancel();

    let outcome = generate_roster(
        &scenario.nurses,
        &scenario.shifts,
        &scenario.stats,
        &config(),
        &token,
    )
    .unwrap();

    let (status, report) = unscheduled(outcome);
    assert_eq!(status, SolveStatus::Unknown(StopReason::Cancelled));
    assert!(!report.has_shortfall());
    assert!(report.summary.contains("cancelled"));
}

#[test]
fn test_ward_week_respects_hard_rules() {
    let scenario = Scenario::new(ward_team(), week_template(7));
    let outcome = generate(&scenario);
    let roster = outcome.roster().unwrap();

    assert!(roster.status.is_success());
    assert_eq!(roster.assignments.len(), scenario.shifts.len());

    let nurses: HashMap<&NurseId, &Nurse> =
        scenario.nurses.iter().map(|nurse| (&nurse.id, nurse)).collect();
    let shifts: HashMap<_, _> = scenario.shifts.iter().map(|shift| (&shift.id, shift)).collect();
    let mut hours: HashMap<&NurseId, f64> = HashMap::new();
    for assignment in &roster.assignments {
        let nurse = nurses[&assignment.nurse_id];
        let shift = shifts[&assignment.shift_id];
        assert!(shift.admits(nurse), "{} cannot work {}", nurse.id, shift.id);
        // every shift is staffed by a single nurse, so senior coverage
        // means that nurse is a senior
        assert!(nurse.is_senior());
        *hours.entry(&nurse.id).or_default() += shift.duration_hours();
    }
    assert!(hours.values().all(|&h| h <= 40.0));
}

#[test]
fn test_empty_inputs_are_rejected() {
    let scenario = two_day_icu();
    let err = generate_roster(
        &[],
        &scenario.shifts,
        &scenario.stats,
        &config(),
        &CancellationToken::new(),
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::Input(shiftforge::InputError::NoNurses)));

    let err = generate_roster(
        &scenario.nurses,
        &[],
        &scenario.stats,
        &config(),
        &CancellationToken::new(),
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::Input(shiftforge::InputError::NoShifts)));
}

#[test]
fn test_invalid_config_is_rejected() {
    let scenario = two_day_icu();
    let mut config = config();
    config.rules.max_consecutive_shifts = 0;

    let err = generate_roster(
        &scenario.nurses,
        &scenario.shifts,
        &scenario.stats,
        &config,
        &CancellationToken::new(),
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

#[test]
fn test_same_seed_same_roster() {
    let scenario = Scenario::new(ward_team(), week_template(3));
    let mut config = config().with_worker_count(WorkerCount::Count(1));
    config.solver.node_limit = Some(20_000);

    let run = || {
        generate_roster(
            &scenario.nurses,
            &scenario.shifts,
            &scenario.stats,
            &config,
            &CancellationToken::new(),
        )
        .unwrap()
    };
    let first = run();
    let second = run();

    let first = first.roster().unwrap();
    let second = second.roster().unwrap();
    assert_eq!(first.status, second.status);
    assert_eq!(first.objective, second.objective);
    assert_eq!(first.assignments, second.assignments);
    assert_ne!(first.id, second.id);
}
