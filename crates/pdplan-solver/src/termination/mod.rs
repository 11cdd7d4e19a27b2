//! Termination conditions for search runs.

mod composite;
mod step_count;
mod time;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;

/// Trait for determining when a search run must stop.
///
/// Engines poll it at their iteration boundary: once per local search
/// step and once per exact search dequeue.
pub trait Termination: Debug {
    /// Returns true if the run should stop.
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool;
}

impl<T: Termination + ?Sized> Termination for &T {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        (**self).is_terminated(scope)
    }
}

/// An absent condition never terminates.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}

#[cfg(test)]
mod tests;
