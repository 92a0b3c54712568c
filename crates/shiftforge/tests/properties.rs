//! Hard-rule invariants over random small instances.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use proptest::prelude::*;
use shiftforge::prelude::*;
use shiftforge::solver::ModelBuilder;
use shiftforge::{Roster, SolveStatus, WorkerCount};
use shiftforge_test::strategies::small_instance;
use shiftforge_test::Scenario;

fn config() -> EngineConfig {
    EngineConfig::default()
        .with_time_limit(Duration::from_secs(10))
        .with_random_seed(1)
        .with_worker_count(WorkerCount::Count(1))
}

fn assert_hard_rules(scenario: &Scenario, roster: &Roster, config: &EngineConfig) {
    let shift_index: HashMap<_, _> = scenario
        .shifts
        .iter()
        .enumerate()
        .map(|(i, shift)| (&shift.id, i))
        .collect();
    let nurse_index: HashMap<_, _> = scenario
        .nurses
        .iter()
        .enumerate()
        .map(|(i, nurse)| (&nurse.id, i))
        .collect();

    // exactly one nurse per shift
    let mut per_shift = vec![0; scenario.shifts.len()];
    let mut per_nurse: Vec<Vec<usize>> = vec![Vec::new(); scenario.nurses.len()];
    for assignment in &roster.assignments {
        let s = shift_index[&assignment.shift_id];
        let n = nurse_index[&assignment.nurse_id];
        per_shift[s] += 1;
        per_nurse[n].push(s);
    }
    assert!(per_shift.iter().all(|&count| count == 1));

    let rules = &config.rules;
    for (n, shifts) in per_nurse.iter().enumerate() {
        let nurse = &scenario.nurses[n];
        let mut minutes = 0;
        let mut dates: BTreeMap<_, u32> = BTreeMap::new();
        for &s in shifts {
            let shift = &scenario.shifts[s];
            assert!(shift.admits(nurse));
            assert!(!nurse.is_off_on(shift.date()));
            minutes += shift.duration_minutes();
            *dates.entry(shift.date()).or_default() += 1;
        }
        assert!(minutes <= i64::from(rules.contract_hours.cap(nurse.contract)) * 60);

        for (i, &a) in shifts.iter().enumerate() {
            for &b in &shifts[i + 1..] {
                let (first, second) = if scenario.shifts[a].start <= scenario.shifts[b].start {
                    (&scenario.shifts[a], &scenario.shifts[b])
                } else {
                    (&scenario.shifts[b], &scenario.shifts[a])
                };
                assert!(first.gap_minutes_until(second) >= rules.min_rest_minutes());
            }
        }

        let k = rules.max_consecutive_shifts;
        for &start in dates.keys() {
            let window: u32 = dates
                .range(start..=start + chrono_days(k))
                .map(|(_, count)| count)
                .sum();
            assert!(window <= k);
        }
    }

    if rules.senior_coverage {
        for assignment in &roster.assignments {
            let n = nurse_index[&assignment.nurse_id];
            assert_eq!(scenario.nurses[n].seniority, SeniorityLevel::Senior);
        }
    }

    // the builder's own model agrees
    let built = ModelBuilder::new(&scenario.nurses, &scenario.shifts, rules).build();
    let mut values = vec![false; built.grid.len()];
    for (n, shifts) in per_nurse.iter().enumerate() {
        for &s in shifts {
            values[built.grid.var(n, s).index()] = true;
        }
    }
    assert!(built.model.is_satisfied_by(&values));
}

fn chrono_days(days: u32) -> chrono::Days {
    chrono::Days::new(u64::from(days))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_rosters_satisfy_hard_rules(scenario in small_instance()) {
        let config = config();
        let outcome = generate_roster(
            &scenario.nurses,
            &scenario.shifts,
            &scenario.stats,
            &config,
            &CancellationToken::new(),
        )
        .unwrap();

        match outcome {
            GenerationOutcome::Scheduled(roster) => {
                prop_assert!(roster.status.is_success());
                assert_hard_rules(&scenario, &roster, &config);
            }
            GenerationOutcome::Unscheduled { status, report } => {
                prop_assert_eq!(status, SolveStatus::Infeasible);
                // a shift no senior may take is named in the report
                for shift in &scenario.shifts {
                    if !scenario.nurses.iter().any(|n| n.is_senior() && shift.admits(n)) {
                        let gap = report.seniority_gap(SeniorityLevel::Senior).unwrap();
                        prop_assert!(gap.uncovered_shifts.contains(&shift.id));
                    }
                }
            }
        }
    }

    #[test]
    fn prop_analysis_is_deterministic(scenario in small_instance()) {
        let config = config();
        let first = shiftforge::analyze(&scenario.nurses, &scenario.shifts, &scenario.stats, &config);
        let second = shiftforge::analyze(&scenario.nurses, &scenario.shifts, &scenario.stats, &config);
        prop_assert_eq!(first, second);
    }
}
