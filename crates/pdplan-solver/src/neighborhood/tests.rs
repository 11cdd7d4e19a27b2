//! Tests for neighborhood generation.

use std::collections::HashSet;

use rand::Rng;

use pdplan_core::{is_feasible, is_well_paired, PdAction, Task, TaskId, Vehicle};
use pdplan_test::{grid_topology, line_topology, task, vehicle};

use super::*;
use crate::scope::seeded_rng;

fn scenario_a() -> (pdplan_core::GraphTopology, Vec<Vehicle>, Vec<Task>) {
    let (topology, cities) = grid_topology(3, 3);
    let fleet = vec![vehicle(0, 4, cities[0]), vehicle(1, 2, cities[8])];
    let tasks = vec![
        task(1, cities[1], cities[5], 1),
        task(2, cities[3], cities[7], 2),
        task(3, cities[2], cities[6], 3),
    ];
    (topology, fleet, tasks)
}

fn assert_solution_feasible(solution: &Solution) {
    for (i, v) in solution.vehicles().iter().enumerate() {
        let route = solution.route(i);
        assert!(is_feasible(route, v.capacity), "vehicle {i} over capacity: {route:?}");
        assert!(is_well_paired(route), "vehicle {i} badly paired: {route:?}");
        let served: HashSet<TaskId> = route.iter().map(PdAction::task_id).collect();
        let listed: HashSet<TaskId> = solution.tasks(i).iter().map(|t| t.id).collect();
        assert_eq!(served, listed);
    }
}

#[test]
fn test_neighbor_count() {
    let (topology, fleet, tasks) = scenario_a();
    let solution = Solution::initial(&topology, fleet, &tasks).unwrap();
    let mut rng = seeded_rng(Some(5));

    let neighbors = NeighborhoodGenerator::new(10).neighbors(&topology, &solution, &mut rng);

    // one reassignment from vehicle 0, ten reorders of vehicle 0
    assert_eq!(neighbors.len(), 11);
    assert_eq!(neighbors[0].tasks(1), &tasks[..1]);
}

#[test]
fn test_random_walk_stays_feasible() {
    let (topology, fleet, tasks) = scenario_a();
    let generator = NeighborhoodGenerator::default();
    let mut rng = seeded_rng(Some(11));
    let mut current = Solution::initial(&topology, fleet, &tasks).unwrap();

    for _ in 0..300 {
        let neighbors = generator.neighbors(&topology, &current, &mut rng);
        for n in &neighbors {
            assert_solution_feasible(n);
            assert_eq!(n.task_count(), 3);
            assert!(
                !n.tasks(1).iter().any(|t| t.weight == 3),
                "weight-3 task reached the capacity-2 vehicle"
            );
            let expected: f64 = (0..n.vehicle_count()).map(|i| n.cost(i)).sum();
            assert!((n.total_cost() - expected).abs() < 1e-9);
        }
        if !neighbors.is_empty() {
            current = neighbors[rng.random_range(0..neighbors.len())].clone();
        }
    }
}

#[test]
fn test_reassign_skips_task_nobody_else_can_carry() {
    let (topology, fleet, tasks) = scenario_a();
    let heavy_first = vec![tasks[2], tasks[0], tasks[1]];
    let solution = Solution::initial(&topology, fleet, &heavy_first).unwrap();
    let mut rng = seeded_rng(Some(1));

    for _ in 0..20 {
        assert!(ReassignMove::select(&solution, 0, &mut rng).is_none());
    }
    assert!(ReassignMove::select(&solution, 1, &mut rng).is_none());
}

#[test]
fn test_reassign_apply() {
    let (topology, cities) = line_topology(4);
    let fleet = vec![vehicle(0, 3, cities[0]), vehicle(1, 3, cities[3]), vehicle(2, 3, cities[1])];
    let a = task(1, cities[1], cities[2], 1);
    let b = task(2, cities[2], cities[3], 1);
    let c = task(3, cities[3], cities[0], 1);
    let solution = Solution::from_routes(
        &topology,
        fleet,
        vec![
            vec![
                PdAction::Pickup(a),
                PdAction::Pickup(b),
                PdAction::Delivery(a),
                PdAction::Delivery(b),
            ],
            vec![PdAction::Pickup(c), PdAction::Delivery(c)],
            Vec::new(),
        ],
    );

    let next = ReassignMove::new(0, 1, a).apply(&topology, &solution);

    assert_eq!(next.route(0), &[PdAction::Pickup(b), PdAction::Delivery(b)]);
    assert_eq!(
        next.route(1),
        &[PdAction::Pickup(a), PdAction::Delivery(a), PdAction::Pickup(c), PdAction::Delivery(c)]
    );
    assert_eq!(next.tasks(1), &[c, a]);
    assert!(next.shares_route_with(&solution, 2));
    // v1: 3 -> 1 -> 2 -> 3 -> 0
    assert_eq!(next.cost(1), 7.0);
}

#[test]
fn test_reorder_apply() {
    let (topology, cities) = line_topology(4);
    let a = task(1, cities[1], cities[2], 1);
    let b = task(2, cities[2], cities[3], 1);
    let solution = Solution::single_vehicle(
        &topology,
        vehicle(0, 2, cities[0]),
        vec![
            PdAction::Pickup(a),
            PdAction::Delivery(a),
            PdAction::Pickup(b),
            PdAction::Delivery(b),
        ],
    );

    // base without b is [Pa, Da]; pickup before Pa, delivery at the end
    let next = ReorderMove::new(0, b, 0, 2).apply(&topology, &solution);

    assert_eq!(
        next.route(0),
        &[PdAction::Pickup(b), PdAction::Pickup(a), PdAction::Delivery(a), PdAction::Delivery(b)]
    );
    assert_eq!(next.tasks(0), solution.tasks(0));
    // 0 -> 2 -> 1 -> 2 -> 3
    assert_eq!(next.total_cost(), 5.0);
}

#[test]
fn test_reorder_sample_respects_tight_capacity() {
    let (topology, cities) = line_topology(5);
    let a = task(1, cities[1], cities[2], 2);
    let b = task(2, cities[3], cities[4], 2);
    let c = task(3, cities[2], cities[3], 1);
    let solution = Solution::single_vehicle(
        &topology,
        vehicle(0, 3, cities[0]),
        vec![
            PdAction::Pickup(a),
            PdAction::Delivery(a),
            PdAction::Pickup(b),
            PdAction::Delivery(b),
            PdAction::Pickup(c),
            PdAction::Delivery(c),
        ],
    );
    let mut rng = seeded_rng(Some(21));

    for _ in 0..200 {
        let m = ReorderMove::sample(&solution, 0, a, &mut rng).unwrap();
        let next = m.apply(&topology, &solution);
        assert!(is_feasible(next.route(0), 3));
        assert!(is_well_paired(next.route(0)));
    }
}

#[test]
fn test_reorder_sample_covers_every_position() {
    let (topology, cities) = line_topology(4);
    let a = task(1, cities[1], cities[2], 1);
    let b = task(2, cities[2], cities[3], 1);
    let solution = Solution::single_vehicle(
        &topology,
        vehicle(0, 10, cities[0]),
        vec![
            PdAction::Pickup(a),
            PdAction::Delivery(a),
            PdAction::Pickup(b),
            PdAction::Delivery(b),
        ],
    );
    let mut rng = seeded_rng(Some(2));

    let mut routes = HashSet::new();
    for _ in 0..500 {
        let m = ReorderMove::sample(&solution, 0, b, &mut rng).unwrap();
        routes.insert(m.apply(&topology, &solution).routes());
    }

    // pickup and delivery among 3 slots, pickup first: 6 distinct routes
    assert_eq!(routes.len(), 6);
}

#[test]
fn test_lone_vehicle_reorders_last_task() {
    let (topology, cities) = line_topology(6);
    let tasks = [
        task(1, cities[1], cities[2], 1),
        task(2, cities[3], cities[4], 1),
        task(3, cities[5], cities[0], 1),
    ];
    let solution = Solution::initial(&topology, vec![vehicle(0, 5, cities[0])], &tasks).unwrap();
    let mut rng = seeded_rng(Some(8));

    let neighbors = NeighborhoodGenerator::new(25).neighbors(&topology, &solution, &mut rng);

    assert_eq!(neighbors.len(), 25);
    for n in &neighbors {
        let others: Vec<PdAction> = n
            .route(0)
            .iter()
            .filter(|a| a.task_id() != TaskId(3))
            .copied()
            .collect();
        assert_eq!(others, &solution.route(0)[..4]);
    }
}

#[test]
fn test_reorder_pickup_leaves_room_until_route_end() {
    let (topology, cities) = line_topology(5);
    let a = task(1, cities[1], cities[2], 2);
    let t = task(2, cities[3], cities[4], 2);
    let solution = Solution::single_vehicle(
        &topology,
        vehicle(0, 3, cities[0]),
        vec![
            PdAction::Pickup(a),
            PdAction::Delivery(a),
            PdAction::Pickup(t),
            PdAction::Delivery(t),
        ],
    );
    let mut rng = seeded_rng(Some(13));

    for _ in 0..200 {
        let m = ReorderMove::sample(&solution, 0, t, &mut rng).unwrap();
        let next = m.apply(&topology, &solution);
        let without_delivery: Vec<PdAction> = next
            .route(0)
            .iter()
            .filter(|x| **x != PdAction::Delivery(t))
            .copied()
            .collect();
        assert!(
            is_feasible(&without_delivery, 3),
            "pickup overlaps a later load: {:?}",
            next.route(0)
        );
        // a and t cannot share the vehicle, so t only fits after a
        assert_eq!(m, ReorderMove::new(0, t, 2, 2));
    }
}

#[test]
fn test_reorder_delivery_ranges_to_route_end() {
    let (topology, cities) = line_topology(5);
    let a = task(1, cities[1], cities[2], 1);
    let b = task(2, cities[2], cities[3], 2);
    let t = task(3, cities[3], cities[4], 1);
    let solution = Solution::single_vehicle(
        &topology,
        vehicle(0, 3, cities[0]),
        vec![
            PdAction::Pickup(a),
            PdAction::Delivery(a),
            PdAction::Pickup(b),
            PdAction::Delivery(b),
            PdAction::Pickup(t),
            PdAction::Delivery(t),
        ],
    );
    let mut rng = seeded_rng(Some(3));

    let mut deliveries = HashSet::new();
    for _ in 0..300 {
        let m = ReorderMove::sample(&solution, 0, t, &mut rng).unwrap();
        let next = m.apply(&topology, &solution);
        assert!(is_feasible(next.route(0), 3));
        assert!(is_well_paired(next.route(0)));
        deliveries.insert(next.route(0).iter().position(|x| *x == PdAction::Delivery(t)));
    }

    // with t picked up first, its delivery can follow any of the 4 base actions
    assert!(deliveries.contains(&Some(1)));
    assert!(deliveries.contains(&Some(5)));
}
