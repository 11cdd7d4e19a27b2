//! Marginal cost estimates.

use pdplan_core::{PdAction, Task, TaskId};

/// How a vehicle's candidate route was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateMethod {
    /// Exact search finished.
    Exact,
    /// Exact search ran out of time; the seed route was used instead.
    ExactInterrupted,
    /// Single-vehicle local search.
    LocalSearch,
}

/// Marginal cost of adding a task to one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleEstimate {
    pub vehicle: usize,
    pub marginal_cost: f64,
    pub method: EstimateMethod,
}

/// Result of
/// [`RoutingPlanner::estimate_marginal_cost`](super::RoutingPlanner::estimate_marginal_cost).
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalCostEstimate {
    pub task: TaskId,
    /// Lowest marginal cost over the fleet.
    pub cost: f64,
    /// Vehicle achieving `cost`.
    pub vehicle: usize,
    /// Every vehicle able to carry the task, in fleet order.
    pub per_vehicle: Vec<VehicleEstimate>,
}

/// The assignment a commit would apply.
#[derive(Debug, Clone)]
pub(crate) struct PendingAssignment {
    pub(crate) task: Task,
    pub(crate) vehicle: usize,
    pub(crate) route: Vec<PdAction>,
}
