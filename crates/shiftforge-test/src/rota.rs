//! Shift fixtures.

use chrono::{Datelike, Duration, Weekday};
use shiftforge_core::{SeniorityLevel, Shift};

use crate::calendar::at;

/// Shift on day `offset` starting at `start_hour` and lasting `hours`.
pub fn shift(id: &str, ward: &str, offset: u32, start_hour: u32, hours: i64) -> Shift {
    let start = at(offset, start_hour);
    Shift::new(id, ward, start, start + Duration::hours(hours))
}

struct Slot {
    ward: &'static str,
    start_hour: u32,
    certifications: &'static [&'static str],
    level: SeniorityLevel,
    weekdays_only: bool,
}

const WEEK_SLOTS: [Slot; 4] = [
    Slot {
        ward: "ICU",
        start_hour: 8,
        certifications: &["ICU"],
        level: SeniorityLevel::Mid,
        weekdays_only: false,
    },
    Slot {
        ward: "ICU",
        start_hour: 16,
        certifications: &["ICU"],
        level: SeniorityLevel::Junior,
        weekdays_only: false,
    },
    Slot {
        ward: "General",
        start_hour: 8,
        certifications: &["BLS"],
        level: SeniorityLevel::Junior,
        weekdays_only: true,
    },
    Slot {
        ward: "Emergency",
        start_hour: 20,
        certifications: &["ACLS", "BLS"],
        level: SeniorityLevel::Mid,
        weekdays_only: false,
    },
];

/// Eight-hour shifts for `days` days from the reference Monday: ICU day and
/// evening, General day on weekdays, Emergency night.
pub fn week_template(days: u32) -> Vec<Shift> {
    let mut shifts = Vec::new();
    for offset in 0..days {
        for slot in &WEEK_SLOTS {
            let date = at(offset, 0).date();
            if slot.weekdays_only && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }
            let id = format!(
                "{}-{}-{:02}",
                slot.ward.to_lowercase(),
                date,
                slot.start_hour
            );
            shifts.push(
                shift(&id, slot.ward, offset, slot.start_hour, 8)
                    .requiring(slot.certifications.iter().copied())
                    .with_min_level(slot.level),
            );
        }
    }
    shifts
}
