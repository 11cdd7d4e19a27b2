//! End-to-end estimate/commit/finalize runs.

use std::collections::HashSet;
use std::time::Duration;

use pdplan_config::PlannerConfig;
use pdplan_core::{PlanAction, RoutingError, Task, TaskId, Topology};
use pdplan_solver::RoutingPlanner;
use pdplan_test::{euclidean_topology, task, vehicle};

const CONFIG: &str = r#"
    random_seed = 2024

    [exact_search]
    task_limit = 4

    [local_search]
    diversification_probability = 0.2

    [timeouts]
    bid_ms = 600
    plan_ms = 800
    safety_margin_ms = 200
"#;

fn points() -> Vec<(f64, f64)> {
    vec![
        (0.0, 0.0),
        (4.0, 1.0),
        (9.0, 3.0),
        (2.0, 7.0),
        (6.0, 6.0),
        (8.0, 9.0),
        (1.0, 4.0),
        (5.0, 3.0),
        (3.0, 9.0),
        (7.0, 1.0),
    ]
}

#[test]
fn test_auction_style_session() {
    let config = PlannerConfig::from_toml_str(CONFIG).unwrap();
    let (topology, cities) = euclidean_topology(&points());
    let fleet = vec![vehicle(0, 6, cities[0]), vehicle(1, 4, cities[5])];
    let mut planner = RoutingPlanner::new(topology, fleet, &config).unwrap();
    let bid_budget = planner.timeouts().bid_budget();
    assert_eq!(bid_budget, Duration::from_millis(400));

    let offered: Vec<Task> = (0..8)
        .map(|i| task(i as u32, cities[i % 10], cities[(i * 3 + 1) % 10], 1 + (i as u32 % 3)))
        .collect();

    // win every other task
    let mut won = Vec::new();
    for (i, t) in offered.iter().enumerate() {
        let estimate = planner.estimate_marginal_cost(*t, bid_budget).unwrap();
        assert_eq!(estimate.task, t.id);
        assert!(estimate.cost.is_finite());
        assert!(estimate.per_vehicle.iter().all(|e| e.marginal_cost >= estimate.cost));
        if i % 2 == 0 {
            planner.commit_task(t).unwrap();
            won.push(*t);
        }
    }

    let committed: usize = (0..2).map(|v| planner.committed_tasks(v).len()).sum();
    assert_eq!(committed, won.len());

    let plan_budget = planner.timeouts().plan_budget();
    let plans = planner.finalize_plans(&won, plan_budget).unwrap();

    let mut picked = HashSet::new();
    let mut delivered = HashSet::new();
    for (plan, v) in plans.iter().zip(planner.vehicles()) {
        let mut load = 0u32;
        for action in &plan.actions {
            match action {
                PlanAction::Move(_) => {}
                PlanAction::Pickup(id) => {
                    load += won.iter().find(|t| t.id == *id).unwrap().weight;
                    assert!(load <= v.capacity);
                    assert!(picked.insert(*id));
                }
                PlanAction::Delivery(id) => {
                    load -= won.iter().find(|t| t.id == *id).unwrap().weight;
                    assert!(picked.contains(id));
                    assert!(delivered.insert(*id));
                }
            }
        }
        assert_eq!(load, 0);
        assert!(plan.total_distance(planner.topology()).is_finite());
    }
    let expected: HashSet<TaskId> = won.iter().map(|t| t.id).collect();
    assert_eq!(picked, expected);
    assert_eq!(delivered, expected);
}

#[test]
fn test_lost_auction_leaves_no_trace() {
    let config = PlannerConfig::new().with_random_seed(5);
    let (topology, cities) = euclidean_topology(&points());
    let fleet = vec![vehicle(0, 5, cities[0])];
    let mut planner = RoutingPlanner::new(topology, fleet, &config).unwrap();

    let lost = task(1, cities[2], cities[3], 2);
    planner.estimate_marginal_cost(lost, Duration::from_millis(200)).unwrap();
    let won = task(2, cities[4], cities[5], 2);
    let estimate = planner.estimate_marginal_cost(won, Duration::from_millis(200)).unwrap();

    assert!(matches!(planner.commit_task(&lost), Err(RoutingError::EstimateMismatch { .. })));
    planner.commit_task(&won).unwrap();

    assert_eq!(planner.committed_tasks(0), &[won]);
    assert!((planner.committed_cost(0) - estimate.cost).abs() < 1e-9);
    assert!(planner.topology().city_count() == 10);
}

#[test]
fn test_same_config_same_estimates() {
    let run = || {
        let config = PlannerConfig::from_toml_str(CONFIG).unwrap();
        let (topology, cities) = euclidean_topology(&points());
        let fleet = vec![vehicle(0, 6, cities[0]), vehicle(1, 4, cities[5])];
        let mut planner = RoutingPlanner::new(topology, fleet, &config).unwrap();
        let tasks: Vec<Task> = (0..3)
            .map(|i| task(i as u32, cities[i + 1], cities[9 - i], 1))
            .collect();
        let mut estimates = Vec::new();
        for t in &tasks {
            let estimate = planner.estimate_marginal_cost(*t, Duration::from_secs(5)).unwrap();
            estimates.push(estimate.cost);
            planner.commit_task(t).unwrap();
        }
        estimates
    };

    assert_eq!(run(), run());
}
