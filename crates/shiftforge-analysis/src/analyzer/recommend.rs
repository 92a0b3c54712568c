//! Prioritized advice and the one-line summary.

use shiftforge_core::{SeniorityLevel, SolveStatus};

use crate::report::{CapacityStatus, InfeasibilityReport, Recommendation, Severity};

fn recommendation(priority: Severity, message: String) -> Recommendation {
    Recommendation { priority, message }
}

/// One recommendation per finding, most urgent first. Ties keep the order
/// in which the findings were reported.
pub(super) fn recommendations(report: &InfeasibilityReport) -> Vec<Recommendation> {
    let mut out = Vec::new();

    let capacity = &report.capacity;
    match capacity.status {
        CapacityStatus::Critical => out.push(recommendation(
            Severity::Critical,
            format!(
                "Hire {} full-time equivalent(s): the team is {:.1} h short of {:.1} required hours",
                capacity.additional_fte_needed, capacity.shortage_hours, capacity.required_hours
            ),
        )),
        CapacityStatus::Warning => out.push(recommendation(
            Severity::Medium,
            format!(
                "Capacity is tight at {:.0}% of demand; consider adding float staff",
                capacity.coverage_ratio * 100.0
            ),
        )),
        CapacityStatus::Ok => {}
    }

    for gap in &report.certification_gaps {
        let message = if gap.qualified_nurses.is_empty() {
            format!(
                "No nurse holds {}; certify staff or hire for {} shift(s)",
                gap.certification, gap.shift_count
            )
        } else {
            format!(
                "Certify more nurses in {}: {:.1} h short across {} shift(s)",
                gap.certification, gap.shortage_hours, gap.shift_count
            )
        };
        out.push(recommendation(Severity::Critical, message));
    }

    for gap in &report.seniority_gaps {
        let priority = if gap.level == SeniorityLevel::Senior {
            Severity::Critical
        } else {
            Severity::High
        };
        let message = if gap.uncovered_shifts.is_empty() {
            format!(
                "Add {} staff: {:.1} h short of {} level coverage",
                gap.level, gap.shortage_hours, gap.level
            )
        } else {
            format!(
                "Hire or promote a {} nurse qualified for {} uncovered shift(s)",
                gap.level,
                gap.uncovered_shifts.len()
            )
        };
        out.push(recommendation(priority, message));
    }

    for gap in &report.ward_gaps {
        out.push(recommendation(
            Severity::High,
            format!(
                "Ward {} is {:.1} h short with {} fully qualified nurse(s); cross-train or hire",
                gap.profile.ward,
                gap.shortage_hours,
                gap.eligible_nurses.len()
            ),
        ));
    }

    for conflict in &report.conflicts {
        let remedy = conflict
            .remedies
            .first()
            .map(|r| format!(" ({r})"))
            .unwrap_or_default();
        out.push(recommendation(
            conflict.severity,
            format!("Resolve {} conflict: {}{remedy}", conflict.kind, conflict.description),
        ));
    }

    if !report.fatigue_issues.is_empty() {
        out.push(recommendation(
            Severity::Medium,
            format!(
                "{} nurse(s) are fatigued and count at reduced capacity; plan recovery time",
                report.fatigue_issues.len()
            ),
        ));
    }

    out.sort_by_key(|r| r.priority);
    out
}

pub(super) fn summary(report: &InfeasibilityReport) -> String {
    let prefix = match report.solve_status {
        Some(SolveStatus::Unknown(reason)) => {
            format!("The search stopped ({reason}) before a roster was found. ")
        }
        Some(SolveStatus::Infeasible) => "No roster satisfies the hard rules. ".to_string(),
        _ => String::new(),
    };

    if report.has_shortfall() {
        let mut parts = Vec::new();
        if report.capacity.is_understaffed {
            parts.push(format!(
                "capacity is {:.1} h short",
                report.capacity.shortage_hours
            ));
        }
        if !report.certification_gaps.is_empty() {
            parts.push(format!(
                "{} certification gap(s)",
                report.certification_gaps.len()
            ));
        }
        if !report.seniority_gaps.is_empty() {
            parts.push(format!("{} seniority gap(s)", report.seniority_gaps.len()));
        }
        if !report.ward_gaps.is_empty() {
            parts.push(format!("{} ward gap(s)", report.ward_gaps.len()));
        }
        format!("{prefix}Staffing falls short: {}.", parts.join(", "))
    } else if !report.conflicts.is_empty() {
        format!(
            "{prefix}Staffing covers demand, but {} rule conflict(s) were found, {} of them blocking.",
            report.conflicts.len(),
            report.blocking_conflicts().count()
        )
    } else {
        format!(
            "{prefix}No structural cause was found; a longer time limit or relaxed preferences may help."
        )
    }
}
