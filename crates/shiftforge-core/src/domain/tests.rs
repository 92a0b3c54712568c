//! Tests for domain value objects.

use super::*;
use chrono::{NaiveDate, NaiveDateTime, Weekday};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[test]
fn test_seniority_ordering() {
    assert!(SeniorityLevel::Junior < SeniorityLevel::Mid);
    assert!(SeniorityLevel::Mid < SeniorityLevel::Senior);
    assert_eq!(SeniorityLevel::Senior.rank(), 3);
}

#[test]
fn test_seniority_parse() {
    assert_eq!("senior".parse::<SeniorityLevel>(), Ok(SeniorityLevel::Senior));
    assert_eq!(" Mid ".parse::<SeniorityLevel>(), Ok(SeniorityLevel::Mid));
    assert!("chief".parse::<SeniorityLevel>().is_err());
}

#[test]
fn test_contract_caps() {
    assert_eq!(ContractType::FullTime.default_weekly_hours(), 40);
    assert_eq!(ContractType::PartTime.default_weekly_hours(), 30);
    assert_eq!(ContractType::Casual.default_weekly_hours(), 20);
    assert_eq!("part-time".parse::<ContractType>(), Ok(ContractType::PartTime));
}

#[test]
fn test_overnight_shift_duration() {
    // 2025-12-08 is a Monday
    let shift = Shift::new("s1", "Emergency", at(8, 20), at(9, 4));
    assert_eq!(shift.duration_minutes(), 480);
    assert!((shift.duration_hours() - 8.0).abs() < f64::EPSILON);
    assert!(shift.is_night());
    assert!(!shift.is_weekend());
    assert_eq!(shift.weekday(), Weekday::Mon);
}

#[test]
fn test_weekend_and_day_shift() {
    let shift = Shift::new("s1", "ICU", at(13, 8), at(13, 16));
    assert!(shift.is_weekend());
    assert!(!shift.is_night());
}

#[test]
fn test_early_morning_counts_as_night() {
    let shift = Shift::new("s1", "ICU", at(8, 5), at(8, 13));
    assert!(shift.is_night());
}

#[test]
fn test_gap_minutes() {
    let first = Shift::new("a", "ICU", at(8, 8), at(8, 16));
    let back_to_back = Shift::new("b", "ICU", at(8, 16), at(9, 0));
    let overlapping = Shift::new("c", "ICU", at(8, 12), at(8, 20));
    assert_eq!(first.gap_minutes_until(&back_to_back), 0);
    assert_eq!(first.gap_minutes_until(&overlapping), -240);
}

#[test]
fn test_shift_admits_nurse() {
    let shift = Shift::new("s1", "ICU", at(8, 8), at(8, 16))
        .requiring(["ICU"])
        .with_min_level(SeniorityLevel::Mid);
    let qualified = Nurse::new("n1", SeniorityLevel::Mid, ContractType::FullTime)
        .with_certifications(["ICU", "BLS"]);
    let junior = Nurse::new("n2", SeniorityLevel::Junior, ContractType::FullTime)
        .with_certifications(["ICU"]);
    let uncertified = Nurse::new("n3", SeniorityLevel::Senior, ContractType::FullTime)
        .with_certifications(["BLS"]);

    assert!(shift.admits(&qualified));
    assert!(!shift.admits(&junior));
    assert!(!shift.admits(&uncertified));
}

#[test]
fn test_time_off_range() {
    let start = NaiveDate::from_ymd_opt(2025, 12, 8).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
    let request = TimeOffRequest::new(start, end, "Conference");
    assert_eq!(request.dates().count(), 3);

    let nurse =
        Nurse::new("n1", SeniorityLevel::Mid, ContractType::Casual).with_time_off(request);
    assert!(nurse.is_off_on(NaiveDate::from_ymd_opt(2025, 12, 9).unwrap()));
    assert!(!nurse.is_off_on(NaiveDate::from_ymd_opt(2025, 12, 11).unwrap()));
}

#[test]
fn test_period_spanning_shifts() {
    let shifts = vec![
        Shift::new("a", "ICU", at(10, 8), at(10, 16)),
        Shift::new("b", "ICU", at(8, 20), at(9, 4)),
    ];
    let period = Period::spanning(&shifts).unwrap();
    assert_eq!(period.start, NaiveDate::from_ymd_opt(2025, 12, 8).unwrap());
    assert_eq!(period.end, NaiveDate::from_ymd_opt(2025, 12, 10).unwrap());
    assert_eq!(period.days(), 3);
    assert!(Period::spanning(&[]).is_none());
}

#[test]
fn test_period_clamp() {
    let date = |d| NaiveDate::from_ymd_opt(2025, 12, d).unwrap();
    let period = Period::new(date(8), date(14));

    let inside = period.clamp(date(1), date(10)).unwrap();
    assert_eq!(inside, Period::new(date(8), date(10)));
    assert_eq!(period.clamp(date(12), date(31)).unwrap().days(), 3);
    assert!(period.clamp(date(15), date(20)).is_none());
    assert!(period.clamp(date(1), date(7)).is_none());
}

#[test]
fn test_fatigue_classification() {
    assert_eq!(FatigueLevel::classify(0.85, 0.5, 0.8), FatigueLevel::High);
    assert_eq!(FatigueLevel::classify(0.5, 0.5, 0.8), FatigueLevel::Moderate);
    assert_eq!(FatigueLevel::classify(0.2, 0.5, 0.8), FatigueLevel::Normal);
}

#[test]
fn test_fatigue_lookup_clamps_and_defaults() {
    let mut stats = NurseStats::new();
    stats.insert("n1".into(), NurseStat::new(1.7));
    assert_eq!(fatigue_of(&stats, &"n1".into()), 1.0);
    assert_eq!(fatigue_of(&stats, &"missing".into()), 0.0);
}

#[test]
fn test_roster_ids_are_unique() {
    let a = RosterId::generate();
    let b = RosterId::generate();
    assert_ne!(a, b);
    assert!(a.as_str().starts_with("roster_"));
}

#[test]
fn test_solve_status_success() {
    assert!(SolveStatus::Optimal.is_success());
    assert!(SolveStatus::Feasible.is_success());
    assert!(!SolveStatus::Infeasible.is_success());
    assert!(!SolveStatus::Unknown(StopReason::TimeLimit).is_success());
    assert_eq!(
        SolveStatus::Unknown(StopReason::Cancelled).to_string(),
        "UNKNOWN (cancelled)"
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_nurse_json_roundtrip() {
    let nurse = Nurse::new("n1", SeniorityLevel::Senior, ContractType::FullTime)
        .with_certifications(["ICU"])
        .with_time_off(TimeOffRequest::day(
            NaiveDate::from_ymd_opt(2025, 12, 8).unwrap(),
            "Family",
        ));
    let json = serde_json::to_string(&nurse).unwrap();
    let back: Nurse = serde_json::from_str(&json).unwrap();
    assert_eq!(back, nurse);
}
