//! Error types for ShiftForge input handling

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::domain::{NurseId, ShiftId};

/// Input rejected before a constraint model is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// No nurses were supplied
    #[error("Input error: nurse collection is empty")]
    NoNurses,

    /// No shifts were supplied
    #[error("Input error: shift collection is empty")]
    NoShifts,

    /// A shift does not end after it starts
    #[error("Input error: shift {id} ends at {end} which is not after its start {start}")]
    MalformedShift {
        id: ShiftId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Two nurses share an id
    #[error("Input error: duplicate nurse id {0}")]
    DuplicateNurse(NurseId),

    /// Two shifts share an id
    #[error("Input error: duplicate shift id {0}")]
    DuplicateShift(ShiftId),

    /// A time-off range ends before it starts
    #[error("Input error: time off for nurse {nurse} ends on {end} before it starts on {start}")]
    MalformedTimeOff {
        nurse: NurseId,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Error returned when parsing a seniority level or contract type from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLevelError {
    pub kind: &'static str,
    pub value: String,
}
