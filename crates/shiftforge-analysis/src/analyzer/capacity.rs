use shiftforge_config::AnalysisConfig;
use shiftforge_core::Shift;

use super::Workforce;
use crate::report::{CapacityAnalysis, CapacityStatus};

pub(super) fn analyze(
    workforce: &Workforce<'_>,
    shifts: &[Shift],
    config: &AnalysisConfig,
) -> CapacityAnalysis {
    let required_hours: f64 = shifts.iter().map(Shift::duration_hours).sum();
    let available_hours = workforce.total_hours();

    if required_hours <= 0.0 {
        return CapacityAnalysis {
            required_hours,
            available_hours,
            coverage_ratio: 1.0,
            is_understaffed: false,
            shortage_hours: 0.0,
            additional_fte_needed: 0,
            status: CapacityStatus::Ok,
        };
    }

    let coverage_ratio = available_hours / required_hours;
    let is_understaffed = coverage_ratio < 1.0;
    let shortage_hours = (required_hours - available_hours).max(0.0);
    let standard = f64::from(config.standard_full_time_hours.max(1));
    let status = if is_understaffed {
        CapacityStatus::Critical
    } else if coverage_ratio < config.tight_capacity_ratio {
        CapacityStatus::Warning
    } else {
        CapacityStatus::Ok
    };

    CapacityAnalysis {
        required_hours,
        available_hours,
        coverage_ratio,
        is_understaffed,
        shortage_hours,
        additional_fte_needed: (shortage_hours / standard).ceil() as u32,
        status,
    }
}
