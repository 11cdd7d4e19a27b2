//! ReassignMove - hands a vehicle's first task to another vehicle.

use rand::Rng;

use pdplan_core::{is_feasible, PdAction, Task, Topology};

use crate::solution::Solution;

/// Moves `task` from vehicle `from` to vehicle `to`.
///
/// The task's pickup and delivery are dropped from the source route and
/// prepended, pickup first, to the target route. The task itself goes to
/// the end of the target's task list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReassignMove {
    from: usize,
    to: usize,
    task: Task,
}

impl ReassignMove {
    pub fn new(from: usize, to: usize, task: Task) -> Self {
        Self { from, to, task }
    }

    /// Picks the first task of `from` and a uniformly random other vehicle
    /// able to carry it. `None` if `from` is empty or nobody else can.
    pub fn select<R: Rng>(solution: &Solution, from: usize, rng: &mut R) -> Option<Self> {
        let task = *solution.tasks(from).first()?;
        let eligible: Vec<usize> = solution
            .vehicles()
            .iter()
            .enumerate()
            .filter(|(j, v)| *j != from && v.can_carry(&task))
            .map(|(j, _)| j)
            .collect();
        if eligible.is_empty() {
            return None;
        }
        let to = eligible[rng.random_range(0..eligible.len())];
        Some(Self::new(from, to, task))
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn apply<T: Topology + ?Sized>(&self, topology: &T, solution: &Solution) -> Solution {
        let id = self.task.id;

        let source_route: Vec<PdAction> = solution
            .route(self.from)
            .iter()
            .filter(|a| a.task_id() != id)
            .copied()
            .collect();
        let source_tasks: Vec<Task> = solution
            .tasks(self.from)
            .iter()
            .filter(|t| t.id != id)
            .copied()
            .collect();

        let mut target_route = Vec::with_capacity(solution.route(self.to).len() + 2);
        target_route.push(PdAction::Pickup(self.task));
        target_route.push(PdAction::Delivery(self.task));
        target_route.extend_from_slice(solution.route(self.to));
        let mut target_tasks = solution.tasks(self.to).to_vec();
        target_tasks.push(self.task);

        // The prepended pair frees its load before the old route starts.
        debug_assert!(is_feasible(&target_route, solution.vehicles()[self.to].capacity));

        solution.with_changes(
            topology,
            [
                (self.from, source_route, source_tasks),
                (self.to, target_route, target_tasks),
            ],
        )
    }
}
