//! Exhaustive single-vehicle reference solver.
//!
//! Enumerates every capacity-feasible interleaving of pickups and
//! deliveries by depth-first search. Only usable for a handful of tasks.

use std::collections::HashSet;

use pdplan_core::{
    is_feasible, is_well_paired, route_cost, PdAction, Task, TaskId, Topology, Vehicle,
};

/// Cheapest feasible route serving all `tasks` with `vehicle`, or `None`
/// if no feasible route exists.
pub fn best_route<T: Topology>(
    topology: &T,
    vehicle: &Vehicle,
    tasks: &[Task],
) -> Option<(f64, Vec<PdAction>)> {
    let mut best: Option<(f64, Vec<PdAction>)> = None;
    let mut path = Vec::with_capacity(tasks.len() * 2);
    let mut picked = vec![false; tasks.len()];
    let mut delivered = vec![false; tasks.len()];
    dfs(
        topology,
        vehicle,
        tasks,
        &mut path,
        &mut picked,
        &mut delivered,
        i64::from(vehicle.capacity),
        &mut best,
    );
    best
}

#[allow(clippy::too_many_arguments)]
fn dfs<T: Topology>(
    topology: &T,
    vehicle: &Vehicle,
    tasks: &[Task],
    path: &mut Vec<PdAction>,
    picked: &mut [bool],
    delivered: &mut [bool],
    free: i64,
    best: &mut Option<(f64, Vec<PdAction>)>,
) {
    if delivered.iter().all(|d| *d) {
        let cost = route_cost(topology, vehicle, path);
        if best.as_ref().map_or(true, |(b, _)| cost < *b) {
            *best = Some((cost, path.clone()));
        }
        return;
    }
    for (i, task) in tasks.iter().enumerate() {
        if !picked[i] {
            let weight = i64::from(task.weight);
            if weight > free {
                continue;
            }
            picked[i] = true;
            path.push(PdAction::Pickup(*task));
            dfs(topology, vehicle, tasks, path, picked, delivered, free - weight, best);
            path.pop();
            picked[i] = false;
        } else if !delivered[i] {
            delivered[i] = true;
            path.push(PdAction::Delivery(*task));
            let free = free + i64::from(task.weight);
            dfs(topology, vehicle, tasks, path, picked, delivered, free, best);
            path.pop();
            delivered[i] = false;
        }
    }
}

/// Panics unless `route` serves exactly `tasks`, pairs every pickup with a
/// later delivery, and respects `capacity`.
pub fn assert_valid_route(route: &[PdAction], tasks: &[Task], capacity: u32) {
    assert!(is_well_paired(route), "route is not well paired: {route:?}");
    assert!(is_feasible(route, capacity), "route exceeds capacity {capacity}: {route:?}");
    let served: HashSet<TaskId> = route.iter().map(PdAction::task_id).collect();
    let expected: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(served, expected, "route serves the wrong task set");
    assert_eq!(route.len(), tasks.len() * 2);
}
