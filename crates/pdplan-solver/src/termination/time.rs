//! Time-based termination.

use std::time::Duration;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the run has used up its time budget.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pdplan_solver::termination::TimeTermination;
///
/// let term = TimeTermination::new(Duration::from_millis(4800));
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        scope.elapsed().is_some_and(|e| e >= self.limit)
    }
}
