//! Neighborhood of a multi-vehicle solution.
//!
//! Two move families produce neighbors:
//! - [`ReassignMove`]: each non-empty vehicle hands its first task to a
//!   random other vehicle that can carry it (only with several vehicles)
//! - [`ReorderMove`]: each vehicle with at least two tasks re-inserts one
//!   task at random feasible positions, several samples per vehicle
//!
//! Every emitted neighbor is capacity-feasible.

mod reassign;
mod reorder;

use rand::Rng;

use pdplan_core::Topology;

use crate::solution::Solution;

pub use reassign::ReassignMove;
pub use reorder::ReorderMove;

/// Generates the neighbors of a solution.
#[derive(Debug, Clone)]
pub struct NeighborhoodGenerator {
    reorder_samples: usize,
}

impl Default for NeighborhoodGenerator {
    fn default() -> Self {
        Self::new(10)
    }
}

impl NeighborhoodGenerator {
    /// Creates a generator drawing `reorder_samples` reorder neighbors per
    /// qualifying vehicle.
    pub fn new(reorder_samples: usize) -> Self {
        Self { reorder_samples }
    }

    pub fn reorder_samples(&self) -> usize {
        self.reorder_samples
    }

    /// Reassignment neighbors first (in source vehicle order), then reorder
    /// neighbors.
    pub fn neighbors<T, R>(&self, topology: &T, solution: &Solution, rng: &mut R) -> Vec<Solution>
    where
        T: Topology + ?Sized,
        R: Rng,
    {
        let vehicle_count = solution.vehicle_count();
        let mut neighbors = Vec::new();

        if vehicle_count > 1 {
            for from in 0..vehicle_count {
                if let Some(m) = ReassignMove::select(solution, from, rng) {
                    neighbors.push(m.apply(topology, solution));
                }
            }
        }

        for vehicle in 0..vehicle_count {
            let tasks = solution.tasks(vehicle);
            if tasks.len() < 2 {
                continue;
            }
            // A lone vehicle always reorders its most recently added task.
            let task = if vehicle_count > 1 {
                tasks[rng.random_range(0..tasks.len())]
            } else {
                tasks[tasks.len() - 1]
            };
            for _ in 0..self.reorder_samples {
                if let Some(m) = ReorderMove::sample(solution, vehicle, task, rng) {
                    neighbors.push(m.apply(topology, solution));
                }
            }
        }

        neighbors
    }
}

#[cfg(test)]
mod tests;
