//! Proptest strategies for random small rostering instances.
//!
//! Instances stay small enough for the search to finish well inside a test's
//! time budget, so every generated case reaches a proven status.

use proptest::prelude::*;
use shiftforge_core::{ContractType, Nurse, NurseStat, SeniorityLevel, Shift, TimeOffRequest};

use crate::calendar::day;
use crate::rota::shift;
use crate::scenarios::Scenario;

const CERTS: [&str; 3] = ["ICU", "ACLS", "BLS"];
const WARDS: [&str; 3] = ["ICU", "Emergency", "General"];

fn level() -> impl Strategy<Value = SeniorityLevel> {
    prop_oneof![
        Just(SeniorityLevel::Junior),
        Just(SeniorityLevel::Mid),
        Just(SeniorityLevel::Senior),
    ]
}

fn contract() -> impl Strategy<Value = ContractType> {
    prop_oneof![
        3 => Just(ContractType::FullTime),
        1 => Just(ContractType::PartTime),
        1 => Just(ContractType::Casual),
    ]
}

fn cert_mask() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(any::<bool>(), CERTS.len()).prop_map(|mask| {
        CERTS
            .iter()
            .zip(mask)
            .filter(|(_, held)| *held)
            .map(|(cert, _)| *cert)
            .collect()
    })
}

fn nurse_at(index: usize) -> impl Strategy<Value = Nurse> {
    (
        level(),
        contract(),
        cert_mask(),
        any::<bool>(),
        prop::option::weighted(0.2, 0u32..4),
    )
        .prop_map(move |(level, contract, certs, avoid_nights, leave)| {
            let mut nurse = Nurse::new(format!("n{index}"), level, contract)
                .with_certifications(certs);
            if avoid_nights {
                nurse = nurse.avoiding_nights();
            }
            if let Some(offset) = leave {
                nurse = nurse.with_time_off(TimeOffRequest::day(day(offset), "Leave"));
            }
            nurse
        })
}

fn shift_at(index: usize) -> impl Strategy<Value = Shift> {
    (
        0u32..4,
        prop_oneof![Just(0u32), Just(8), Just(16), Just(20)],
        0usize..WARDS.len(),
        cert_mask(),
        prop_oneof![
            3 => Just(SeniorityLevel::Junior),
            1 => Just(SeniorityLevel::Mid),
        ],
    )
        .prop_map(move |(offset, hour, ward, certs, level)| {
            let certs: Vec<&str> = certs.into_iter().take(1).collect();
            shift(&format!("s{index}"), WARDS[ward], offset, hour, 8)
                .requiring(certs)
                .with_min_level(level)
        })
}

/// Between 2 and 4 nurses, 1 to 6 shifts over four days, random fatigue.
pub fn small_instance() -> impl Strategy<Value = Scenario> {
    (2usize..=4, 1usize..=6)
        .prop_flat_map(|(nurse_count, shift_count)| {
            let nurses: Vec<_> = (0..nurse_count).map(nurse_at).collect();
            let shifts: Vec<_> = (0..shift_count).map(shift_at).collect();
            let fatigue = prop::collection::vec(0.0f64..1.0, nurse_count);
            (nurses, shifts, fatigue)
        })
        .prop_map(|(nurses, shifts, fatigue)| {
            let stats = nurses
                .iter()
                .zip(fatigue)
                .map(|(nurse, score)| (nurse.id.clone(), NurseStat::new(score)))
                .collect();
            Scenario {
                nurses,
                shifts,
                stats,
            }
        })
}
