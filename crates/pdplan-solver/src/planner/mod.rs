//! Stateful estimate/commit/finalize planner.
//!
//! [`RoutingPlanner`] keeps the tasks committed to each vehicle together
//! with the route currently planned for them. Estimating a task prices it
//! against every vehicle without touching that state and remembers the
//! cheapest assignment; committing applies exactly that assignment.
//! Finalizing re-optimizes the whole fleet and expands routes into
//! primitive plans.

mod estimate;

use std::collections::HashMap;
use std::time::Duration;

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use pdplan_config::{PlannerConfig, TimeoutConfig};
use pdplan_core::{
    route_cost, PdAction, Result, RoutingError, Task, TaskId, Topology, Vehicle, VehiclePlan,
};

use crate::builder::SearchBuilder;
use crate::exact::{AnyBounder, ExactSearch, SearchOutcome};
use crate::local_search::LocalSearch;
use crate::scope::{seeded_rng, SearchScope};
use crate::solution::Solution;

use estimate::PendingAssignment;
pub use estimate::{EstimateMethod, MarginalCostEstimate, VehicleEstimate};

/// Tasks committed to one vehicle and the route serving them.
#[derive(Debug, Clone, Default)]
struct CommittedRoute {
    tasks: Vec<Task>,
    route: Vec<PdAction>,
}

/// Pickup-and-delivery planner for one fleet.
///
/// All randomness of a planner comes from one generator, seeded from
/// `PlannerConfig::random_seed` when set.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use pdplan_config::PlannerConfig;
/// use pdplan_core::{GraphTopology, Task, Vehicle};
/// use pdplan_solver::RoutingPlanner;
///
/// let mut builder = GraphTopology::builder();
/// let a = builder.add_city("A");
/// let b = builder.add_city("B");
/// builder.add_road(a, b, 3.0);
/// let topology = builder.build().unwrap();
///
/// let fleet = vec![Vehicle::new("truck", 10, 1.0, a)];
/// let config = PlannerConfig::new().with_random_seed(1);
/// let mut planner = RoutingPlanner::new(topology, fleet, &config).unwrap();
///
/// let task = Task::new(1, a, b, 2);
/// let estimate = planner.estimate_marginal_cost(task, Duration::from_millis(500)).unwrap();
/// assert_eq!(estimate.cost, 3.0);
///
/// planner.commit_task(&task).unwrap();
/// let plans = planner.finalize_plans(&[task], Duration::from_millis(50)).unwrap();
/// assert_eq!(plans[0].actions.len(), 3);
/// ```
pub struct RoutingPlanner<T> {
    topology: T,
    vehicles: Vec<Vehicle>,
    committed: Vec<CommittedRoute>,
    pending: Option<PendingAssignment>,
    exact: ExactSearch<AnyBounder>,
    exact_task_limit: usize,
    local_search: LocalSearch,
    step_limit: Option<u64>,
    timeouts: TimeoutConfig,
    rng: ChaCha8Rng,
}

impl<T: Topology> RoutingPlanner<T> {
    /// Creates a planner with nothing committed.
    ///
    /// # Errors
    ///
    /// `Config` if `config` fails [`PlannerConfig::validate`];
    /// `InvalidState` if `vehicles` is empty.
    pub fn new(topology: T, vehicles: Vec<Vehicle>, config: &PlannerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|err| RoutingError::Config(err.to_string()))?;
        if vehicles.is_empty() {
            return Err(RoutingError::InvalidState(
                "planner needs at least one vehicle".to_string(),
            ));
        }
        debug!(
            event = "planner_created",
            vehicles = vehicles.len(),
            seeded = config.random_seed.is_some(),
        );
        Ok(Self {
            topology,
            committed: vec![CommittedRoute::default(); vehicles.len()],
            vehicles,
            pending: None,
            exact: SearchBuilder::exact_search(&config.exact_search),
            exact_task_limit: config.exact_search.task_limit,
            local_search: SearchBuilder::local_search(&config.local_search),
            step_limit: config.local_search.step_limit,
            timeouts: config.timeouts.clone(),
            rng: seeded_rng(config.random_seed),
        })
    }

    pub fn topology(&self) -> &T {
        &self.topology
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Configured time budgets, margin already deducted by
    /// [`TimeoutConfig::bid_budget`] and [`TimeoutConfig::plan_budget`].
    pub fn timeouts(&self) -> &TimeoutConfig {
        &self.timeouts
    }

    pub fn committed_tasks(&self, vehicle: usize) -> &[Task] {
        &self.committed[vehicle].tasks
    }

    pub fn committed_route(&self, vehicle: usize) -> &[PdAction] {
        &self.committed[vehicle].route
    }

    pub fn committed_cost(&self, vehicle: usize) -> f64 {
        route_cost(&self.topology, &self.vehicles[vehicle], &self.committed[vehicle].route)
    }

    /// Task of the outstanding estimate, if any.
    pub fn pending_task(&self) -> Option<TaskId> {
        self.pending.as_ref().map(|p| p.task.id)
    }

    /// Prices `task` against every vehicle able to carry it and remembers
    /// the cheapest assignment, replacing any earlier estimate.
    ///
    /// Each vehicle gets an equal share of `budget`. Committed state is not
    /// modified.
    ///
    /// # Errors
    ///
    /// `Unservable` if no vehicle can carry the task.
    pub fn estimate_marginal_cost(
        &mut self,
        task: Task,
        budget: Duration,
    ) -> Result<MarginalCostEstimate> {
        if !self.vehicles.iter().any(|v| v.can_carry(&task)) {
            return Err(RoutingError::Unservable {
                task: task.id,
                weight: task.weight,
            });
        }

        let share = budget / self.vehicles.len() as u32;
        let mut per_vehicle = Vec::with_capacity(self.vehicles.len());
        let mut best: Option<(f64, usize, Vec<PdAction>)> = None;

        for vehicle in 0..self.vehicles.len() {
            if !self.vehicles[vehicle].can_carry(&task) {
                debug!(
                    event = "vehicle_skipped",
                    vehicle = %self.vehicles[vehicle].name,
                    task = %task.id,
                    weight = task.weight,
                );
                continue;
            }

            let (route, method) = self.candidate_route(vehicle, task, share)?;
            let marginal_cost = route_cost(&self.topology, &self.vehicles[vehicle], &route)
                - self.committed_cost(vehicle);
            debug!(
                event = "vehicle_estimate",
                vehicle = %self.vehicles[vehicle].name,
                task = %task.id,
                marginal_cost,
                method = ?method,
            );
            per_vehicle.push(VehicleEstimate {
                vehicle,
                marginal_cost,
                method,
            });
            if best.as_ref().map_or(true, |(cost, _, _)| marginal_cost < *cost) {
                best = Some((marginal_cost, vehicle, route));
            }
        }

        let (cost, vehicle, route) = best.ok_or_else(|| {
            RoutingError::Internal(format!("no vehicle priced task {}", task.id))
        })?;
        info!(
            event = "estimate",
            task = %task.id,
            vehicle = %self.vehicles[vehicle].name,
            marginal_cost = cost,
        );
        self.pending = Some(PendingAssignment {
            task,
            vehicle,
            route,
        });

        Ok(MarginalCostEstimate {
            task: task.id,
            cost,
            vehicle,
            per_vehicle,
        })
    }

    /// Applies the outstanding estimate for `task`.
    ///
    /// # Errors
    ///
    /// `NoPendingEstimate` if nothing was estimated since the last commit;
    /// `EstimateMismatch` if the outstanding estimate is for another task.
    /// The outstanding estimate survives both.
    pub fn commit_task(&mut self, task: &Task) -> Result<()> {
        match &self.pending {
            None => return Err(RoutingError::NoPendingEstimate),
            Some(pending) if pending.task.id != task.id => {
                return Err(RoutingError::EstimateMismatch {
                    expected: pending.task.id,
                    got: task.id,
                });
            }
            Some(_) => {}
        }

        if let Some(pending) = self.pending.take() {
            let committed = &mut self.committed[pending.vehicle];
            committed.tasks.push(pending.task);
            committed.route = pending.route;
            info!(
                event = "commit",
                task = %pending.task.id,
                vehicle = %self.vehicles[pending.vehicle].name,
                vehicle_tasks = committed.tasks.len(),
            );
        }
        Ok(())
    }

    /// Re-optimizes all committed work together and expands each vehicle's
    /// route into moves, pickups and deliveries.
    ///
    /// Committed tasks are looked up by id in `all_tasks`, so callers may
    /// pass fresher task records; ids missing there keep their committed
    /// record. Committed state is left as is.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the refreshed tasks overload a committed route.
    pub fn finalize_plans(
        &mut self,
        all_tasks: &[Task],
        budget: Duration,
    ) -> Result<Vec<VehiclePlan>> {
        let by_id: HashMap<TaskId, Task> = all_tasks.iter().map(|t| (t.id, *t)).collect();
        let resolve = |task: &Task| match by_id.get(&task.id) {
            Some(fresh) => *fresh,
            None => {
                warn!(event = "task_not_found", task = %task.id, "keeping committed record");
                *task
            }
        };

        let tasks: Vec<Vec<Task>> = self
            .committed
            .iter()
            .map(|c| c.tasks.iter().map(resolve).collect())
            .collect();
        let routes: Vec<Vec<PdAction>> = self
            .committed
            .iter()
            .map(|c| c.route.iter().map(|a| a.with_task(resolve(a.task()))).collect())
            .collect();

        let seed = Solution::from_assignments(&self.topology, self.vehicles.clone(), routes, tasks);
        if !seed.is_feasible() {
            return Err(RoutingError::InvalidState(
                "refreshed task weights exceed a vehicle's capacity".to_string(),
            ));
        }

        let solution = if seed.task_count() == 0 {
            seed
        } else {
            let termination = SearchBuilder::termination(budget, self.step_limit);
            let mut scope = SearchScope::new(&mut self.rng);
            self.local_search.solve(&self.topology, seed, &mut scope, &termination)
        };

        info!(
            event = "finalize",
            vehicles = self.vehicles.len(),
            tasks = solution.task_count(),
            total_cost = solution.total_cost(),
        );

        Ok(self
            .vehicles
            .iter()
            .enumerate()
            .map(|(i, v)| VehiclePlan::expand(&self.topology, v, solution.route(i)))
            .collect())
    }

    fn candidate_route(
        &mut self,
        vehicle: usize,
        task: Task,
        budget: Duration,
    ) -> Result<(Vec<PdAction>, EstimateMethod)> {
        let committed = &self.committed[vehicle];
        let mut tasks = committed.tasks.clone();
        tasks.push(task);
        let mut seed_route = Vec::with_capacity(committed.route.len() + 2);
        seed_route.push(PdAction::Pickup(task));
        seed_route.push(PdAction::Delivery(task));
        seed_route.extend_from_slice(&committed.route);

        let termination = SearchBuilder::termination(budget, self.step_limit);
        let mut scope = SearchScope::new(&mut self.rng);
        let vehicle = &self.vehicles[vehicle];

        if tasks.len() < self.exact_task_limit {
            let outcome = self
                .exact
                .solve(&self.topology, vehicle, &tasks, &mut scope, &termination)?;
            return match outcome {
                SearchOutcome::Found { route, .. } => Ok((route, EstimateMethod::Exact)),
                SearchOutcome::Interrupted => {
                    warn!(
                        event = "exact_search_fallback",
                        vehicle = %vehicle.name,
                        tasks = tasks.len(),
                        "using the seed route"
                    );
                    Ok((seed_route, EstimateMethod::ExactInterrupted))
                }
            };
        }

        let seed = Solution::from_assignments(
            &self.topology,
            vec![vehicle.clone()],
            vec![seed_route],
            vec![tasks],
        );
        let solution = self.local_search.solve(&self.topology, seed, &mut scope, &termination);
        Ok((solution.route(0).to_vec(), EstimateMethod::LocalSearch))
    }
}

impl<T> std::fmt::Debug for RoutingPlanner<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingPlanner")
            .field("vehicles", &self.vehicles.len())
            .field("committed_tasks", &self.committed.iter().map(|c| c.tasks.len()).sum::<usize>())
            .field("pending", &self.pending.as_ref().map(|p| p.task.id))
            .finish()
    }
}
