//! Input validation shared by roster generation and staffing simulation.

use std::collections::HashSet;

use crate::domain::{Nurse, Shift};
use crate::error::InputError;

/// Rejects inputs that must never reach model construction.
///
/// Checks, in order: non-empty collections, unique ids, shifts that end after
/// they start, and time-off ranges that do not run backwards.
///
/// # Examples
///
/// ```
/// use shiftforge_core::{validate_inputs, InputError, Nurse, SeniorityLevel, ContractType};
///
/// let nurses = vec![Nurse::new("n1", SeniorityLevel::Senior, ContractType::FullTime)];
/// assert_eq!(validate_inputs(&nurses, &[]), Err(InputError::NoShifts));
/// ```
pub fn validate_inputs(nurses: &[Nurse], shifts: &[Shift]) -> Result<(), InputError> {
    if nurses.is_empty() {
        return Err(InputError::NoNurses);
    }
    if shifts.is_empty() {
        return Err(InputError::NoShifts);
    }

    let mut seen = HashSet::with_capacity(nurses.len());
    for nurse in nurses {
        if !seen.insert(&nurse.id) {
            return Err(InputError::DuplicateNurse(nurse.id.clone()));
        }
        if let Some(bad) = nurse
            .preferences
            .time_off
            .iter()
            .find(|request| request.end < request.start)
        {
            return Err(InputError::MalformedTimeOff {
                nurse: nurse.id.clone(),
                start: bad.start,
                end: bad.end,
            });
        }
    }

    let mut seen = HashSet::with_capacity(shifts.len());
    for shift in shifts {
        if !seen.insert(&shift.id) {
            return Err(InputError::DuplicateShift(shift.id.clone()));
        }
        if shift.end <= shift.start {
            return Err(InputError::MalformedShift {
                id: shift.id.clone(),
                start: shift.start,
                end: shift.end,
            });
        }
    }

    Ok(())
}
