//! ReorderMove - moves one task's pickup and delivery within a route.

use rand::Rng;

use pdplan_core::{PdAction, Task, Topology};

use crate::solution::Solution;

/// Re-inserts `task` into its own vehicle's route.
///
/// Positions index the route with the task removed: the pickup goes before
/// element `pickup_at`, the delivery before element `delivery_at`, with
/// `pickup_at <= delivery_at`. Either may equal the length of that route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderMove {
    vehicle: usize,
    task: Task,
    pickup_at: usize,
    delivery_at: usize,
}

impl ReorderMove {
    pub fn new(vehicle: usize, task: Task, pickup_at: usize, delivery_at: usize) -> Self {
        debug_assert!(pickup_at <= delivery_at);
        Self {
            vehicle,
            task,
            pickup_at,
            delivery_at,
        }
    }

    /// Draws a uniformly random feasible re-insertion of `task`.
    ///
    /// The pickup position is drawn among those where the route stays
    /// feasible with the task carried to the end; any delivery position
    /// after it is then feasible too. `None` only if the vehicle cannot
    /// carry the task at all.
    pub fn sample<R: Rng>(
        solution: &Solution,
        vehicle: usize,
        task: Task,
        rng: &mut R,
    ) -> Option<Self> {
        let base = remove_task(solution.route(vehicle), &task);
        let free = free_capacity_profile(&base, solution.vehicles()[vehicle].capacity);
        let weight = i64::from(task.weight);

        // min_free[k]: least free capacity from position k to the end
        let mut min_free = free;
        for k in (0..min_free.len().saturating_sub(1)).rev() {
            min_free[k] = min_free[k].min(min_free[k + 1]);
        }

        let pickups: Vec<usize> = (0..min_free.len()).filter(|&k| min_free[k] >= weight).collect();
        if pickups.is_empty() {
            return None;
        }
        let pickup_at = pickups[rng.random_range(0..pickups.len())];
        let delivery_at = rng.random_range(pickup_at..=base.len());

        Some(Self::new(vehicle, task, pickup_at, delivery_at))
    }

    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn apply<T: Topology + ?Sized>(&self, topology: &T, solution: &Solution) -> Solution {
        let base = remove_task(solution.route(self.vehicle), &self.task);
        let mut route = Vec::with_capacity(base.len() + 2);
        route.extend_from_slice(&base[..self.pickup_at]);
        route.push(PdAction::Pickup(self.task));
        route.extend_from_slice(&base[self.pickup_at..self.delivery_at]);
        route.push(PdAction::Delivery(self.task));
        route.extend_from_slice(&base[self.delivery_at..]);

        solution.with_changes(
            topology,
            [(self.vehicle, route, solution.tasks(self.vehicle).to_vec())],
        )
    }
}

fn remove_task(route: &[PdAction], task: &Task) -> Vec<PdAction> {
    route.iter().filter(|a| a.task_id() != task.id).copied().collect()
}

/// Free capacity before each position of `route`, plus one entry for the
/// end of the route.
fn free_capacity_profile(route: &[PdAction], capacity: u32) -> Vec<i64> {
    let mut free = Vec::with_capacity(route.len() + 1);
    let mut current = i64::from(capacity);
    free.push(current);
    for action in route {
        current += action.capacity_delta();
        free.push(current);
    }
    free
}
