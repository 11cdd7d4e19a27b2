//! OR-composition of termination conditions.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates when either of a pair of terminations does.
///
/// # Example
///
/// ```
/// use pdplan_solver::termination::{OrTermination, StepCountTermination, TimeTermination};
///
/// // Stop after 2 seconds or 1000 steps
/// let termination = OrTermination::new((
///     TimeTermination::millis(2000),
///     StepCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

impl<A, B> Termination for OrTermination<(A, B)>
where
    A: Termination,
    B: Termination,
{
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        let (first, second) = &self.0;
        first.is_terminated(scope) || second.is_terminated(scope)
    }
}
