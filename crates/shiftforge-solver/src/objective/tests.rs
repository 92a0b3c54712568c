use super::*;
use chrono::Weekday;
use shiftforge_core::{NurseStat, SeniorityLevel};
use shiftforge_test::{nurse, shift};

fn no_tie_break() -> ObjectiveWeights {
    ObjectiveWeights {
        tie_break: 0,
        ..ObjectiveWeights::default()
    }
}

fn build(nurses: &[Nurse], shifts: &[Shift], stats: &NurseStats, weights: &ObjectiveWeights) -> Objective {
    let grid = VarGrid::new(nurses.len(), shifts.len());
    ObjectiveBuilder::new(nurses, shifts, stats, &FatigueConfig::default(), weights).build(&grid)
}

#[test]
fn test_deviation_penalty() {
    let term = DeviationTerm {
        kind: DeviationKind::FairShare,
        vars: Vec::new(),
        target: 2,
        excess_weight: 10,
        deficit_weight: 15,
    };
    assert_eq!(term.penalty(2), 0);
    assert_eq!(term.penalty(4), -20);
    assert_eq!(term.penalty(0), -30);
    assert_eq!(term.incurred_excess(1), 0);
    assert_eq!(term.incurred_excess(3), -10);
    assert_eq!(term.marginal(1), 15);
    assert_eq!(term.marginal(2), -10);
}

#[test]
fn test_preference_coefficients() {
    // Day 0 is a Monday; day 5 is a Saturday
    let nurses = vec![
        nurse("senior", SeniorityLevel::Senior, &[]),
        nurse("tired", SeniorityLevel::Mid, &[]),
        nurse("owl", SeniorityLevel::Mid, &[])
            .avoiding_nights()
            .with_preferred_days([Weekday::Mon]),
    ];
    let shifts = vec![shift("mon-day", "ICU", 0, 8, 8), shift("sat-night", "ICU", 5, 22, 8)];
    let mut stats = NurseStats::new();
    stats.insert("tired".into(), NurseStat::new(0.9));

    let objective = build(&nurses, &shifts, &stats, &no_tie_break());
    let grid = VarGrid::new(3, 2);

    assert_eq!(objective.coefficient(grid.var(0, 0)), 3);
    assert_eq!(objective.coefficient(grid.var(1, 0)), -50);
    assert_eq!(objective.coefficient(grid.var(1, 1)), -50 - 30 - 30);
    assert_eq!(objective.coefficient(grid.var(2, 0)), 5);
    assert_eq!(objective.coefficient(grid.var(2, 1)), -50);
}

#[test]
fn test_fairness_terms() {
    let nurses = vec![
        nurse("n1", SeniorityLevel::Mid, &[]),
        nurse("n2", SeniorityLevel::Mid, &[]).avoiding_nights(),
    ];
    let shifts = vec![
        shift("a", "ICU", 0, 8, 8),
        shift("b", "ICU", 5, 8, 8),
        shift("c", "ICU", 1, 21, 8),
        shift("d", "ICU", 2, 8, 8),
    ];
    let objective = build(&nurses, &shifts, &NurseStats::new(), &no_tie_break());

    let count = |kind| {
        objective
            .deviations()
            .iter()
            .filter(|t| t.kind == kind)
            .count()
    };
    assert_eq!(count(DeviationKind::FairShare), 2);
    assert_eq!(count(DeviationKind::WeekendShare), 2);
    assert_eq!(count(DeviationKind::NightShare), 1);

    let fair = &objective.deviations()[0];
    assert_eq!(fair.target, 2);
    assert_eq!(fair.vars.len(), 4);

    let weekend = objective
        .deviations()
        .iter()
        .find(|t| t.kind == DeviationKind::WeekendShare)
        .unwrap();
    assert_eq!(weekend.target, 1);
    assert_eq!(weekend.deficit_weight, 0);
}

#[test]
fn test_evaluate_combines_linear_and_deviation() {
    let nurses = vec![
        nurse("n1", SeniorityLevel::Senior, &[]),
        nurse("n2", SeniorityLevel::Mid, &[]),
    ];
    let shifts = vec![shift("a", "ICU", 0, 8, 8), shift("b", "ICU", 1, 8, 8)];
    let objective = build(&nurses, &shifts, &NurseStats::new(), &no_tie_break());

    // n1 takes both: +6 linear, n1 one over target (-10), n2 one under (-15)
    assert_eq!(objective.evaluate(&[true, true, false, false]), 6 - 10 - 15);
    // one each: +3 for the senior, fair share met
    assert_eq!(objective.evaluate(&[true, false, false, true]), 3);
}

#[test]
fn test_tie_break_is_seeded_and_bounded() {
    let nurses: Vec<Nurse> = (0..4)
        .map(|i| nurse(&format!("n{i}"), SeniorityLevel::Mid, &[]))
        .collect();
    let shifts: Vec<Shift> = (0..6)
        .map(|d| shift(&format!("s{d}"), "General", d, 8, 8))
        .collect();
    let grid = VarGrid::new(nurses.len(), shifts.len());
    let stats = NurseStats::new();
    let fatigue = FatigueConfig::default();
    let weights = ObjectiveWeights::default();

    let coefficients = |seed| {
        let objective = ObjectiveBuilder::new(&nurses, &shifts, &stats, &fatigue, &weights)
            .with_seed(seed)
            .build(&grid);
        (0..grid.len())
            .map(|i| objective.coefficient(VarId::new(i)))
            .collect::<Vec<_>>()
    };

    let first = coefficients(7);
    assert_eq!(first, coefficients(7));
    assert!(first.iter().all(|c| (-1..=1).contains(c)));
    assert_ne!(first, coefficients(8));
}
