//! Nurse fixtures.

use shiftforge_core::{ContractType, Nurse, SeniorityLevel};

/// Full-time nurse holding `certifications`.
pub fn nurse(id: &str, level: SeniorityLevel, certifications: &[&str]) -> Nurse {
    Nurse::new(id, level, ContractType::FullTime)
        .with_name(format!("Nurse {id}"))
        .with_certifications(certifications.iter().copied())
}

/// Senior nurse qualified for every ward of the weekly template.
pub fn senior(id: &str) -> Nurse {
    nurse(id, SeniorityLevel::Senior, &["ICU", "ACLS", "BLS"])
}

/// A team large enough to staff [`crate::week_template`] with senior
/// coverage on every shift, plus non-senior staff.
pub fn ward_team() -> Vec<Nurse> {
    let mut team: Vec<Nurse> = (1..=8).map(|i| senior(&format!("sen{i:02}"))).collect();
    team.push(nurse("mid01", SeniorityLevel::Mid, &["ICU", "BLS"]));
    team.push(nurse("mid02", SeniorityLevel::Mid, &["ACLS", "BLS"]));
    team.push(nurse("jun01", SeniorityLevel::Junior, &["BLS"]).avoiding_nights());
    team
}
