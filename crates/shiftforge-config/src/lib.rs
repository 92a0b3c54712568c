//! Configuration system for ShiftForge.
//!
//! Load engine configuration from TOML or YAML files to control the solver
//! budget, regulatory limits, objective weights and analysis assumptions
//! without code changes. Every section is optional and falls back to the
//! defaults used by the wards.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use shiftforge_config::EngineConfig;
//! use std::time::Duration;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     [solver]
//!     time_limit_ms = 5000
//!     random_seed = 7
//!
//!     [rules]
//!     min_rest_hours = 10
//!     max_consecutive_shifts = 4
//! "#).unwrap();
//!
//! assert_eq!(config.solver.time_limit(), Duration::from_secs(5));
//! assert_eq!(config.rules.min_rest_hours, 10);
//! assert_eq!(config.rules.contract_hours.full_time, 40);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use shiftforge_config::EngineConfig;
//!
//! let config = EngineConfig::load("shiftforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shiftforge_core::{ContractType, FatigueLevel};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Search budget and parallelism.
    #[serde(default)]
    pub solver: SolverConfig,

    /// Hard regulatory limits.
    #[serde(default)]
    pub rules: RuleConfig,

    /// Fatigue thresholds and capacity discounts.
    #[serde(default)]
    pub fatigue: FatigueConfig,

    /// Soft-constraint weights.
    #[serde(default)]
    pub weights: ObjectiveWeights,

    /// Assumptions used by the infeasibility analyzer and simulator.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the solver time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.solver.time_limit_ms = limit.as_millis().min(u128::from(u64::MAX)) as u64;
        self
    }

    /// Sets the random seed used for tie-breaking.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.solver.random_seed = Some(seed);
        self
    }

    /// Sets the number of search workers.
    pub fn with_worker_count(mut self, workers: WorkerCount) -> Self {
        self.solver.worker_count = workers;
        self
    }

    /// Enables or disables per-shift senior coverage.
    pub fn with_senior_coverage(mut self, enabled: bool) -> Self {
        self.rules.senior_coverage = enabled;
        self
    }

    /// Checks cross-field invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solver.time_limit_ms == 0 {
            return Err(ConfigError::Invalid("time_limit_ms must be positive".into()));
        }
        if let WorkerCount::Count(0) = self.solver.worker_count {
            return Err(ConfigError::Invalid("worker count must be positive".into()));
        }
        if self.rules.max_consecutive_shifts == 0 {
            return Err(ConfigError::Invalid(
                "max_consecutive_shifts must be at least 1".into(),
            ));
        }
        if self.rules.rest_scan_window_hours < self.rules.min_rest_hours {
            return Err(ConfigError::Invalid(format!(
                "rest_scan_window_hours ({}) must not be shorter than min_rest_hours ({})",
                self.rules.rest_scan_window_hours, self.rules.min_rest_hours
            )));
        }
        let hours = &self.rules.contract_hours;
        if hours.full_time == 0 || hours.part_time == 0 || hours.casual == 0 {
            return Err(ConfigError::Invalid("contract hour caps must be positive".into()));
        }
        self.fatigue.validate()?;
        if self.analysis.standard_full_time_hours == 0 {
            return Err(ConfigError::Invalid(
                "standard_full_time_hours must be positive".into(),
            ));
        }
        if self.weights.tie_break < 0 {
            return Err(ConfigError::Invalid("tie_break must not be negative".into()));
        }
        Ok(())
    }
}

/// Search worker count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// Available parallelism, capped at [`WorkerCount::AUTO_CAP`].
    #[default]
    Auto,

    /// Single-threaded search.
    None,

    /// Specific number of workers.
    Count(usize),
}

impl WorkerCount {
    pub const AUTO_CAP: usize = 8;

    /// Resolves to a concrete worker count, at least one.
    pub fn resolve(&self) -> usize {
        match self {
            Self::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(Self::AUTO_CAP),
            Self::None => 1,
            Self::Count(n) => (*n).max(1),
        }
    }
}

/// Solver budget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SolverConfig {
    /// Wall-clock budget in milliseconds.
    pub time_limit_ms: u64,

    /// Number of parallel search workers.
    pub worker_count: WorkerCount,

    /// Seed for tie-break terms and value ordering. Drawn per call when absent.
    pub random_seed: Option<u64>,

    /// Maximum search nodes per worker.
    pub node_limit: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 30_000,
            worker_count: WorkerCount::Auto,
            random_seed: None,
            node_limit: None,
        }
    }
}

impl SolverConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}

/// Contract hour caps over the scheduling horizon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ContractHours {
    pub full_time: u32,
    pub part_time: u32,
    pub casual: u32,
}

impl Default for ContractHours {
    fn default() -> Self {
        Self {
            full_time: ContractType::FullTime.default_weekly_hours(),
            part_time: ContractType::PartTime.default_weekly_hours(),
            casual: ContractType::Casual.default_weekly_hours(),
        }
    }
}

impl ContractHours {
    pub fn cap(&self, contract: ContractType) -> u32 {
        match contract {
            ContractType::FullTime => self.full_time,
            ContractType::PartTime => self.part_time,
            ContractType::Casual => self.casual,
        }
    }
}

/// Hard-constraint limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct RuleConfig {
    /// Minimum hours between the end of one shift and the start of the next.
    pub min_rest_hours: u32,

    /// Shift pairs whose starts are further apart than this are never compared.
    pub rest_scan_window_hours: u32,

    /// At most this many shifts in any run of `max_consecutive_shifts + 1` dates.
    pub max_consecutive_shifts: u32,

    /// Every shift needs an eligible Senior assigned.
    pub senior_coverage: bool,

    pub contract_hours: ContractHours,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_rest_hours: 8,
            rest_scan_window_hours: 24,
            max_consecutive_shifts: 3,
            senior_coverage: true,
            contract_hours: ContractHours::default(),
        }
    }
}

impl RuleConfig {
    pub fn min_rest_minutes(&self) -> i64 {
        i64::from(self.min_rest_hours) * 60
    }

    pub fn rest_scan_window_minutes(&self) -> i64 {
        i64::from(self.rest_scan_window_hours) * 60
    }
}

/// Fatigue thresholds and the capacity discount applied per bucket.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct FatigueConfig {
    pub moderate_threshold: f64,
    pub high_threshold: f64,
    pub moderate_capacity_factor: f64,
    pub high_capacity_factor: f64,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            moderate_threshold: 0.5,
            high_threshold: 0.8,
            moderate_capacity_factor: 0.75,
            high_capacity_factor: 0.5,
        }
    }
}

impl FatigueConfig {
    /// Buckets a clamped fatigue score.
    pub fn level(&self, score: f64) -> FatigueLevel {
        FatigueLevel::classify(score, self.moderate_threshold, self.high_threshold)
    }

    /// Fraction of contracted hours a nurse in `level` is expected to work.
    pub fn capacity_factor(&self, level: FatigueLevel) -> f64 {
        match level {
            FatigueLevel::High => self.high_capacity_factor,
            FatigueLevel::Moderate => self.moderate_capacity_factor,
            FatigueLevel::Normal => 1.0,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.moderate_threshold) || !in_unit(self.high_threshold) {
            return Err(ConfigError::Invalid(
                "fatigue thresholds must lie in [0, 1]".into(),
            ));
        }
        if self.moderate_threshold > self.high_threshold {
            return Err(ConfigError::Invalid(
                "moderate_threshold must not exceed high_threshold".into(),
            ));
        }
        if !in_unit(self.moderate_capacity_factor) || !in_unit(self.high_capacity_factor) {
            return Err(ConfigError::Invalid(
                "capacity factors must lie in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Weights of the soft-constraint objective. Signs are applied by the
/// objective builder; every value here is a magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ObjectiveWeights {
    pub senior_bonus: i64,
    pub high_fatigue_penalty: i64,
    pub moderate_fatigue_penalty: i64,
    pub fatigued_weekend_penalty: i64,
    pub fatigued_night_penalty: i64,
    pub avoided_night_penalty: i64,
    pub preferred_day_bonus: i64,
    pub fair_share_excess_penalty: i64,
    pub fair_share_deficit_penalty: i64,
    pub weekend_excess_penalty: i64,
    pub night_excess_penalty: i64,
    /// Magnitude of the random per-variable tie-break term.
    pub tie_break: i64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            senior_bonus: 3,
            high_fatigue_penalty: 50,
            moderate_fatigue_penalty: 25,
            fatigued_weekend_penalty: 30,
            fatigued_night_penalty: 30,
            avoided_night_penalty: 50,
            preferred_day_bonus: 5,
            fair_share_excess_penalty: 10,
            fair_share_deficit_penalty: 15,
            weekend_excess_penalty: 30,
            night_excess_penalty: 30,
            tie_break: 1,
        }
    }
}

impl ObjectiveWeights {
    /// Smallest non-zero preference or fairness weight.
    pub fn smallest_real_weight(&self) -> Option<i64> {
        [
            self.senior_bonus,
            self.high_fatigue_penalty,
            self.moderate_fatigue_penalty,
            self.fatigued_weekend_penalty,
            self.fatigued_night_penalty,
            self.avoided_night_penalty,
            self.preferred_day_bonus,
            self.fair_share_excess_penalty,
            self.fair_share_deficit_penalty,
            self.weekend_excess_penalty,
            self.night_excess_penalty,
        ]
        .into_iter()
        .map(i64::abs)
        .filter(|w| *w > 0)
        .min()
    }

    /// Tie-break magnitude, reduced so it stays strictly below every real weight.
    pub fn effective_tie_break(&self) -> i64 {
        match self.smallest_real_weight() {
            Some(min) => self.tie_break.clamp(0, min - 1),
            None => self.tie_break.max(0),
        }
    }
}

/// Assumptions of the infeasibility analyzer and staffing simulator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct AnalysisConfig {
    /// Hours of one full-time equivalent, used to size hires.
    pub standard_full_time_hours: u32,

    /// Shifts a nurse can sustain per week in the ward-load heuristic.
    pub assumed_max_shifts_per_week: u32,

    /// Coverage ratio below which capacity is reported as tight.
    pub tight_capacity_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            standard_full_time_hours: 40,
            assumed_max_shifts_per_week: 5,
            tight_capacity_ratio: 1.15,
        }
    }
}

#[cfg(test)]
mod tests;
