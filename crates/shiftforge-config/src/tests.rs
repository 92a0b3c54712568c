//! Tests for engine configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [solver]
        time_limit_ms = 2000
        worker_count = { count = 4 }
        random_seed = 42

        [rules]
        min_rest_hours = 10
        senior_coverage = false

        [rules.contract_hours]
        casual = 16

        [fatigue]
        high_threshold = 0.9

        [weights]
        avoided_night_penalty = 80
    "#;

    let config = EngineConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.solver.time_limit(), Duration::from_secs(2));
    assert_eq!(config.solver.worker_count, WorkerCount::Count(4));
    assert_eq!(config.solver.random_seed, Some(42));
    assert_eq!(config.rules.min_rest_hours, 10);
    assert_eq!(config.rules.max_consecutive_shifts, 3);
    assert!(!config.rules.senior_coverage);
    assert_eq!(config.rules.contract_hours.cap(ContractType::Casual), 16);
    assert_eq!(config.rules.contract_hours.cap(ContractType::FullTime), 40);
    assert_eq!(config.fatigue.high_threshold, 0.9);
    assert_eq!(config.fatigue.moderate_threshold, 0.5);
    assert_eq!(config.weights.avoided_night_penalty, 80);
    assert_eq!(config.weights.senior_bonus, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        solver:
          time_limit_ms: 500
          worker_count: none
        analysis:
          standard_full_time_hours: 38
    "#;

    let config = EngineConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.solver.worker_count, WorkerCount::None);
    assert_eq!(config.solver.worker_count.resolve(), 1);
    assert_eq!(config.analysis.standard_full_time_hours, 38);
    assert_eq!(config.rules, RuleConfig::default());
}

#[test]
fn test_empty_document_is_default() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.solver.time_limit(), Duration::from_secs(30));
}

#[test]
fn test_builder() {
    let config = EngineConfig::new()
        .with_time_limit(Duration::from_millis(250))
        .with_random_seed(123)
        .with_worker_count(WorkerCount::Count(2))
        .with_senior_coverage(false);

    assert_eq!(config.solver.time_limit_ms, 250);
    assert_eq!(config.solver.random_seed, Some(123));
    assert_eq!(config.solver.worker_count.resolve(), 2);
    assert!(!config.rules.senior_coverage);
}

#[test]
fn test_auto_workers_are_capped() {
    let workers = WorkerCount::Auto.resolve();
    assert!(workers >= 1);
    assert!(workers <= WorkerCount::AUTO_CAP);
}

#[test]
fn test_validate_rejects_inverted_thresholds() {
    let mut config = EngineConfig::default();
    config.fatigue.moderate_threshold = 0.9;
    config.fatigue.high_threshold = 0.6;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_zero_budget() {
    let config = EngineConfig::default().with_time_limit(Duration::ZERO);
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_short_scan_window() {
    let mut config = EngineConfig::default();
    config.rules.rest_scan_window_hours = 4;
    assert!(config.validate().is_err());
}

#[test]
fn test_tie_break_stays_below_real_weights() {
    let mut weights = ObjectiveWeights::default();
    assert_eq!(weights.effective_tie_break(), 1);

    weights.tie_break = 10;
    assert_eq!(weights.effective_tie_break(), 2);
}

#[test]
fn test_unknown_file_is_io_error() {
    let err = EngineConfig::load("/nonexistent/shiftforge.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_fatigue_buckets_and_factors() {
    let fatigue = FatigueConfig::default();
    assert_eq!(fatigue.level(0.8), FatigueLevel::High);
    assert_eq!(fatigue.level(0.6), FatigueLevel::Moderate);
    assert_eq!(fatigue.capacity_factor(FatigueLevel::High), 0.5);
    assert_eq!(fatigue.capacity_factor(FatigueLevel::Moderate), 0.75);
    assert_eq!(fatigue.capacity_factor(fatigue.level(0.1)), 1.0);
}
