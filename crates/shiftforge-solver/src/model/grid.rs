//! Dense nurse-major layout of (nurse, shift) variables.

use super::VarId;

/// Maps `(nurse index, shift index)` to a [`VarId`] and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarGrid {
    nurses: usize,
    shifts: usize,
}

impl VarGrid {
    pub fn new(nurses: usize, shifts: usize) -> Self {
        Self { nurses, shifts }
    }

    pub fn nurses(&self) -> usize {
        self.nurses
    }

    pub fn shifts(&self) -> usize {
        self.shifts
    }

    pub fn len(&self) -> usize {
        self.nurses * self.shifts
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn var(&self, nurse: usize, shift: usize) -> VarId {
        debug_assert!(nurse < self.nurses && shift < self.shifts);
        VarId::new(nurse * self.shifts + shift)
    }

    #[inline]
    pub fn nurse_of(&self, var: VarId) -> usize {
        var.index() / self.shifts
    }

    #[inline]
    pub fn shift_of(&self, var: VarId) -> usize {
        var.index() % self.shifts
    }

    /// All variables of one nurse, in shift order.
    pub fn nurse_vars(&self, nurse: usize) -> impl Iterator<Item = VarId> + '_ {
        (0..self.shifts).map(move |s| self.var(nurse, s))
    }

    /// All variables of one shift, in nurse order.
    pub fn shift_vars(&self, shift: usize) -> impl Iterator<Item = VarId> + '_ {
        (0..self.nurses).map(move |n| self.var(n, shift))
    }
}
