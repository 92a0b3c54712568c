//! Ward Week Example
//!
//! Rosters one week of ICU, General and Emergency shifts for a small team,
//! then removes most of the senior staff to show the infeasibility report and
//! a simulated hiring round.

use std::time::Duration;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use shiftforge::prelude::*;
use shiftforge::report::Severity;
use shiftforge::{NurseStat, Roster, SimulatedChange};

const WEEK_START: (i32, u32, u32) = (2025, 12, 8);

fn at(day: u32, hour: u32) -> Option<NaiveDateTime> {
    let (year, month, first) = WEEK_START;
    NaiveDate::from_ymd_opt(year, month, first + day)?.and_hms_opt(hour, 0, 0)
}

/// Day and evening ICU shifts, a weekday General shift and an Emergency night.
fn week_shifts() -> Vec<Shift> {
    let slots: [(&str, u32, &[&str], SeniorityLevel, bool); 4] = [
        ("ICU", 8, &["ICU"], SeniorityLevel::Mid, false),
        ("ICU", 16, &["ICU"], SeniorityLevel::Junior, false),
        ("General", 8, &["BLS"], SeniorityLevel::Junior, true),
        ("Emergency", 20, &["ACLS", "BLS"], SeniorityLevel::Mid, false),
    ];

    let mut shifts = Vec::new();
    for day in 0..7 {
        for &(ward, hour, certs, level, weekdays_only) in &slots {
            let Some(start) = at(day, hour) else { continue };
            if weekdays_only && matches!(start.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }
            let id = format!("{}-{}-{:02}", ward.to_lowercase(), start.date(), hour);
            shifts.push(
                Shift::new(id, ward, start, start + chrono::Duration::hours(8))
                    .requiring(certs.iter().copied())
                    .with_min_level(level),
            );
        }
    }
    shifts
}

fn team() -> Vec<Nurse> {
    let mut team: Vec<Nurse> = (1..=8)
        .map(|i| {
            let nurse =
                Nurse::new(format!("sen{i:02}"), SeniorityLevel::Senior, ContractType::FullTime)
                    .with_name(format!("Senior Nurse {i}"))
                    .with_certifications(["ICU", "ACLS", "BLS"]);
            if i == 2 {
                nurse.with_preferred_days([Weekday::Sat, Weekday::Sun])
            } else {
                nurse
            }
        })
        .collect();
    team.push(
        Nurse::new("mid01", SeniorityLevel::Mid, ContractType::FullTime)
            .with_name("Mid Nurse 1")
            .with_certifications(["ICU", "BLS"]),
    );
    team.push(
        Nurse::new("jun01", SeniorityLevel::Junior, ContractType::PartTime)
            .with_name("Junior Nurse 1")
            .with_certifications(["BLS"])
            .avoiding_nights()
            .with_preferred_days([Weekday::Mon, Weekday::Tue]),
    );
    team
}

fn print_roster(roster: &Roster, shifts: &[Shift]) {
    println!(
        "\nRoster {} ({} to {}), status {}, objective {}",
        roster.id, roster.period.start, roster.period.end, roster.status, roster.objective
    );
    println!("{}", "-".repeat(60));
    for assignment in &roster.assignments {
        let Some(shift) = shifts.iter().find(|s| s.id == assignment.shift_id) else {
            continue;
        };
        println!(
            "{:<10} {} {:>5}-{:<5} {}",
            shift.ward,
            shift.date(),
            shift.start.format("%H:%M"),
            shift.end.format("%H:%M"),
            assignment.nurse_id
        );
    }
}

fn print_report(report: &InfeasibilityReport) {
    println!("\n{}", report.summary);
    for recommendation in &report.recommendations {
        let marker = match recommendation.priority {
            Severity::Critical | Severity::High => "!!",
            Severity::Medium | Severity::Low => "- ",
        };
        println!("  {marker} [{}] {}", recommendation.priority, recommendation.message);
    }
}

fn main() -> Result<(), EngineError> {
    shiftforge::console::init();

    let shifts = week_shifts();
    let nurses = team();
    let mut stats = NurseStats::new();
    stats.insert("sen03".into(), NurseStat::new(0.85));
    stats.insert("sen05".into(), NurseStat::new(0.6));

    let config = EngineConfig::default()
        .with_time_limit(Duration::from_secs(10))
        .with_random_seed(2025);
    let cancel = CancellationToken::new();

    match generate_roster(&nurses, &shifts, &stats, &config, &cancel)? {
        GenerationOutcome::Scheduled(roster) => print_roster(&roster, &shifts),
        GenerationOutcome::Unscheduled { report, .. } => print_report(&report),
    }

    // Keep only two seniors: senior coverage can no longer be met.
    let short_team: Vec<Nurse> = nurses
        .into_iter()
        .filter(|nurse| !nurse.is_senior() || nurse.id.as_str() <= "sen02")
        .collect();
    match generate_roster(&short_team, &shifts, &stats, &config, &cancel)? {
        GenerationOutcome::Scheduled(roster) => print_roster(&roster, &shifts),
        GenerationOutcome::Unscheduled { report, .. } => print_report(&report),
    }

    let simulation =
        simulate_staffing_change(&short_team, &shifts, &stats, &StaffingAction::Hire, &config)?;
    println!("\nSimulated hiring round (gaps closed: {}):", simulation.success);
    for change in &simulation.changes {
        if let SimulatedChange::Hire { nurse, reason } = change {
            println!("  + {} {} {:?}: {}", nurse.id, nurse.seniority, nurse.certifications, reason);
        }
    }
    for posting in &simulation.job_postings {
        println!(
            "  posting: {} x {} {:?} ({})",
            posting.positions,
            posting.level,
            posting.certifications,
            posting.ward.as_deref().unwrap_or("any ward")
        );
    }

    Ok(())
}
