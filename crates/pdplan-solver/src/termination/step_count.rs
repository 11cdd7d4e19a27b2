//! Step count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a number of local search steps.
///
/// # Example
///
/// ```
/// use pdplan_solver::termination::StepCountTermination;
///
/// let term = StepCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        scope.step_count() >= self.limit
    }
}
