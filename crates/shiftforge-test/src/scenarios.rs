//! Small instances with a single, known reason for being unschedulable.

use shiftforge_core::{Nurse, NurseStat, NurseStats, SeniorityLevel, Shift, TimeOffRequest};

use crate::calendar::day;
use crate::rota::shift;
use crate::staff::nurse;

/// Inputs of one engine call.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub nurses: Vec<Nurse>,
    pub shifts: Vec<Shift>,
    pub stats: NurseStats,
}

impl Scenario {
    pub fn new(nurses: Vec<Nurse>, shifts: Vec<Shift>) -> Self {
        Self {
            nurses,
            shifts,
            stats: NurseStats::new(),
        }
    }

    pub fn with_fatigue(mut self, nurse: &str, score: f64) -> Self {
        self.stats.insert(nurse.into(), NurseStat::new(score));
        self
    }
}

/// One senior-level ICU shift and a team where nobody holds ICU.
pub fn missing_certification() -> Scenario {
    let shifts = vec![shift("icu-mon-08", "ICU", 0, 8, 8)
        .requiring(["ICU"])
        .with_min_level(SeniorityLevel::Senior)];
    let nurses = vec![nurse("n1", SeniorityLevel::Senior, &["BLS"])];
    Scenario::new(nurses, shifts)
}

/// Seven daily 8-hour shifts and a single full-time nurse.
pub fn sole_nurse_week() -> Scenario {
    let shifts = (0..7)
        .map(|d| shift(&format!("gen-{d}"), "General", d, 8, 8).requiring(["BLS"]))
        .collect();
    let nurses = vec![nurse("n1", SeniorityLevel::Senior, &["BLS"])];
    Scenario::new(nurses, shifts)
}

/// The only nurse is on leave for the whole horizon.
pub fn whole_horizon_leave() -> Scenario {
    let shifts = vec![
        shift("icu-mon", "ICU", 0, 8, 8).requiring(["ICU"]),
        shift("icu-tue", "ICU", 1, 8, 8).requiring(["ICU"]),
    ];
    let nurses = vec![nurse("n1", SeniorityLevel::Senior, &["ICU"])
        .with_time_off(TimeOffRequest::new(day(0), day(1), "Annual leave"))];
    Scenario::new(nurses, shifts)
}

/// Back-to-back shifts on one ward with a single qualified nurse.
pub fn back_to_back() -> Scenario {
    let shifts = vec![
        shift("icu-day", "ICU", 0, 8, 8).requiring(["ICU"]),
        shift("icu-eve", "ICU", 0, 16, 8).requiring(["ICU"]),
    ];
    let nurses = vec![nurse("n1", SeniorityLevel::Senior, &["ICU"])];
    Scenario::new(nurses, shifts)
}

/// A feasible two-day ICU rota with two senior nurses.
pub fn two_day_icu() -> Scenario {
    let shifts = vec![
        shift("icu-mon", "ICU", 0, 8, 8).requiring(["ICU"]),
        shift("icu-tue", "ICU", 1, 8, 8).requiring(["ICU"]),
    ];
    let nurses = vec![
        nurse("n1", SeniorityLevel::Senior, &["ICU"]),
        nurse("n2", SeniorityLevel::Senior, &["ICU"]),
    ];
    Scenario::new(nurses, shifts)
}
