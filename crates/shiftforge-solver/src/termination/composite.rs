//! Composite termination.
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use shiftforge_core::StopReason;

use super::Termination;
use crate::scope::SearchScope;

/// Combines terminations with OR logic; the first child that fires decides
/// the reason.
///
/// # Examples
///
/// ```
/// use shiftforge_solver::termination::{
///     NodeCountTermination, OrTermination, TimeTermination,
/// };
///
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     NodeCountTermination::new(1_000_000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn check(&self, scope: &SearchScope) -> Option<StopReason> {
                None$(.or_else(|| (self.0).$idx.check(scope)))+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
