//! Turns a solved variable assignment into a [`Roster`].

use shiftforge_core::{
    Assignment, Nurse, Period, Roster, RosterId, RosterMetadata, Shift, SolveStatus,
};

use crate::model::{VarGrid, VarId};

/// Builds a roster from the true variables of `values`.
///
/// Assignments are ordered by shift start, then shift id. Returns `None` when
/// there are no shifts to span a period.
pub fn materialize(
    nurses: &[Nurse],
    shifts: &[Shift],
    grid: &VarGrid,
    values: &[bool],
    objective: i64,
    status: SolveStatus,
) -> Option<Roster> {
    let period = Period::spanning(shifts)?;

    let mut chosen: Vec<(usize, usize)> = values
        .iter()
        .enumerate()
        .filter(|(_, value)| **value)
        .map(|(index, _)| {
            let var = VarId::new(index);
            (grid.nurse_of(var), grid.shift_of(var))
        })
        .collect();
    chosen.sort_by(|&(_, a), &(_, b)| {
        shifts[a]
            .start
            .cmp(&shifts[b].start)
            .then_with(|| shifts[a].id.cmp(&shifts[b].id))
    });

    let assignments = chosen
        .into_iter()
        .map(|(n, s)| Assignment::new(nurses[n].id.clone(), shifts[s].id.clone()))
        .collect();

    Some(Roster {
        id: RosterId::generate(),
        period,
        assignments,
        metadata: RosterMetadata::pending(),
        objective,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftforge_core::SeniorityLevel;
    use shiftforge_test::{day, nurse, shift};

    #[test]
    fn test_assignments_follow_shift_start() {
        let nurses = vec![
            nurse("n1", SeniorityLevel::Senior, &[]),
            nurse("n2", SeniorityLevel::Mid, &[]),
        ];
        let shifts = vec![
            shift("late", "ICU", 1, 8, 8),
            shift("early", "ICU", 0, 8, 8),
        ];
        let grid = VarGrid::new(2, 2);
        // n1 takes "late", n2 takes "early"
        let values = [true, false, false, true];

        let roster =
            materialize(&nurses, &shifts, &grid, &values, 12, SolveStatus::Optimal).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.assignments[0].shift_id.as_str(), "early");
        assert_eq!(roster.assignments[0].nurse_id.as_str(), "n2");
        assert_eq!(roster.nurse_for(&"late".into()).map(|n| n.as_str()), Some("n1"));
        assert_eq!(roster.period, Period::new(day(0), day(1)));
        assert_eq!(roster.metadata.compliance_status, "Pending");
        assert_eq!(roster.metadata.empathy_score, 0.0);
        assert_eq!(roster.objective, 12);
    }

    #[test]
    fn test_no_shifts_no_roster() {
        let roster = materialize(&[], &[], &VarGrid::new(0, 0), &[], 0, SolveStatus::Optimal);
        assert!(roster.is_none());
    }
}
