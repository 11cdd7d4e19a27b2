use super::*;
use crate::domain::Task;
use crate::topology::GraphTopology;

// Cities on a line at positions 0, 1, 3, 6.
fn line() -> (GraphTopology, [CityId; 4]) {
    let mut builder = GraphTopology::builder();
    let c0 = builder.add_city("c0");
    let c1 = builder.add_city("c1");
    let c2 = builder.add_city("c2");
    let c3 = builder.add_city("c3");
    builder
        .add_road(c0, c1, 1.0)
        .add_road(c1, c2, 2.0)
        .add_road(c2, c3, 3.0);
    (builder.build().unwrap(), [c0, c1, c2, c3])
}

#[test]
fn test_empty_route_costs_nothing() {
    let (topology, [c0, ..]) = line();
    let vehicle = Vehicle::new("v", 10, 5.0, c0);

    assert_eq!(route_cost(&topology, &vehicle, &[]), 0.0);
}

#[test]
fn test_cost_sums_legs_times_rate() {
    let (topology, [c0, c1, c2, c3]) = line();
    let t1 = Task::new(1, c2, c1, 1);
    let t2 = Task::new(2, c1, c3, 1);
    let vehicle = Vehicle::new("v", 10, 3.0, c0);
    let route = [
        PdAction::Pickup(t1),
        PdAction::Delivery(t1),
        PdAction::Pickup(t2),
        PdAction::Delivery(t2),
    ];

    // c0 -> c2 (3) -> c1 (2) -> c1 (0) -> c3 (5)
    assert_eq!(route_distance(&topology, c0, &route), 10.0);
    assert_eq!(route_cost(&topology, &vehicle, &route), 30.0);
}

#[test]
fn test_feasible_when_load_fits() {
    let (_, [c0, c1, ..]) = line();
    let a = Task::new(1, c0, c1, 2);
    let b = Task::new(2, c0, c1, 3);
    let route = [
        PdAction::Pickup(a),
        PdAction::Pickup(b),
        PdAction::Delivery(a),
        PdAction::Delivery(b),
    ];

    assert!(is_feasible(&route, 5));
    assert!(!is_feasible(&route, 4));
}

#[test]
fn test_feasibility_checks_every_prefix() {
    let (_, [c0, c1, ..]) = line();
    let a = Task::new(1, c0, c1, 3);
    let b = Task::new(2, c0, c1, 3);
    let sequential = [
        PdAction::Pickup(a),
        PdAction::Delivery(a),
        PdAction::Pickup(b),
        PdAction::Delivery(b),
    ];
    let overlapping = [
        PdAction::Pickup(a),
        PdAction::Pickup(b),
        PdAction::Delivery(b),
        PdAction::Delivery(a),
    ];

    assert!(is_feasible(&sequential, 3));
    assert!(!is_feasible(&overlapping, 3));
}

#[test]
fn test_feasible_load_stays_within_capacity() {
    let (_, [c0, c1, ..]) = line();
    let tasks: Vec<Task> = (0..4).map(|i| Task::new(i, c0, c1, i + 1)).collect();
    let route: Vec<PdAction> = tasks
        .iter()
        .map(|t| PdAction::Pickup(*t))
        .chain(tasks.iter().rev().map(|t| PdAction::Delivery(*t)))
        .collect();
    let capacity = 10;

    assert!(is_feasible(&route, capacity));
    let mut free = i64::from(capacity);
    for action in &route {
        free += action.capacity_delta();
        assert!((0..=i64::from(capacity)).contains(&free));
    }
}

#[test]
fn test_well_paired() {
    let (_, [c0, c1, ..]) = line();
    let a = Task::new(1, c0, c1, 1);
    let b = Task::new(2, c0, c1, 1);

    assert!(is_well_paired(&[
        PdAction::Pickup(a),
        PdAction::Pickup(b),
        PdAction::Delivery(a),
        PdAction::Delivery(b),
    ]));
    assert!(!is_well_paired(&[PdAction::Delivery(a), PdAction::Pickup(a)]));
    assert!(!is_well_paired(&[PdAction::Pickup(a)]));
    assert!(!is_well_paired(&[
        PdAction::Pickup(a),
        PdAction::Delivery(a),
        PdAction::Delivery(a),
    ]));
}
