//! Route cost model.
//!
//! Pure functions over an ordered pickup/delivery sequence. Every other
//! component prices and validates routes through these.

use std::collections::HashSet;

use crate::domain::{CityId, PdAction, Vehicle};
use crate::topology::Topology;

/// Distance travelled when performing `actions` in order, starting at `start`.
pub fn route_distance<T: Topology + ?Sized>(
    topology: &T,
    start: CityId,
    actions: &[PdAction],
) -> f64 {
    let mut current = start;
    let mut total = 0.0;
    for action in actions {
        let next = action.city();
        total += topology.distance(current, next);
        current = next;
    }
    total
}

/// Cost of `vehicle` performing `actions` from its home city.
///
/// # Example
///
/// ```
/// use pdplan_core::{route_cost, CityId, GraphTopology, PdAction, Task, Vehicle};
///
/// let mut builder = GraphTopology::builder();
/// let a = builder.add_city("A");
/// let b = builder.add_city("B");
/// builder.add_road(a, b, 10.0);
/// let topology = builder.build().unwrap();
///
/// let task = Task::new(0, b, a, 1);
/// let vehicle = Vehicle::new("truck", 5, 2.0, a);
/// let route = [PdAction::Pickup(task), PdAction::Delivery(task)];
///
/// assert_eq!(route_cost(&topology, &vehicle, &route), 40.0);
/// ```
pub fn route_cost<T: Topology + ?Sized>(
    topology: &T,
    vehicle: &Vehicle,
    actions: &[PdAction],
) -> f64 {
    route_distance(topology, vehicle.home_city, actions) * vehicle.cost_per_km
}

/// Returns false as soon as the free capacity would drop below zero.
///
/// Free capacity starts at `capacity`, decreases by the task weight on a
/// pickup and increases on a delivery.
pub fn is_feasible(actions: &[PdAction], capacity: u32) -> bool {
    let mut free = i64::from(capacity);
    for action in actions {
        free += action.capacity_delta();
        if free < 0 {
            return false;
        }
    }
    true
}

/// Returns true if every task appears exactly once as a pickup followed,
/// later, by exactly one delivery.
pub fn is_well_paired(actions: &[PdAction]) -> bool {
    let mut picked = HashSet::new();
    let mut delivered = HashSet::new();
    for action in actions {
        let id = action.task_id();
        match action {
            PdAction::Pickup(_) => {
                if !picked.insert(id) {
                    return false;
                }
            }
            PdAction::Delivery(_) => {
                if !picked.contains(&id) || !delivered.insert(id) {
                    return false;
                }
            }
        }
    }
    picked.len() == delivered.len()
}

#[cfg(test)]
mod tests;
