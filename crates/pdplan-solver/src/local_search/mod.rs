//! Stochastic local search over multi-vehicle solutions.
//!
//! Each step generates the neighborhood of the incumbent. With the
//! diversification probability the incumbent is kept as is; otherwise the
//! cheapest neighbor replaces it unless it is worse than the incumbent.
//! Equal-cost neighbors are accepted, so the search can drift across
//! plateaus. The best solution seen is tracked alongside.

use rand::Rng;
use tracing::{debug, info, trace};

use pdplan_config::ReturnPolicy;
use pdplan_core::{Result, Task, Topology, Vehicle};

use crate::neighborhood::NeighborhoodGenerator;
use crate::scope::SearchScope;
use crate::solution::Solution;
use crate::termination::Termination;

const PROGRESS_INTERVAL: u64 = 1000;

/// What happened in one local search step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub step: u64,
    pub incumbent_cost: f64,
    pub best_cost: f64,
    pub neighbor_count: usize,
    pub diversified: bool,
}

/// Local search engine.
///
/// # Example
///
/// ```
/// use pdplan_core::{GraphTopology, Task, Vehicle};
/// use pdplan_solver::local_search::LocalSearch;
/// use pdplan_solver::neighborhood::NeighborhoodGenerator;
/// use pdplan_solver::scope::{seeded_rng, SearchScope};
/// use pdplan_solver::termination::StepCountTermination;
///
/// let mut builder = GraphTopology::builder();
/// let a = builder.add_city("A");
/// let b = builder.add_city("B");
/// let c = builder.add_city("C");
/// builder.add_road(a, b, 1.0).add_road(b, c, 1.0);
/// let topology = builder.build().unwrap();
///
/// let fleet = vec![Vehicle::new("v0", 4, 1.0, a), Vehicle::new("v1", 4, 1.0, c)];
/// let tasks = [Task::new(1, c, b, 1), Task::new(2, a, b, 1)];
///
/// let mut rng = seeded_rng(Some(7));
/// let mut scope = SearchScope::new(&mut rng);
/// let search = LocalSearch::new(NeighborhoodGenerator::default(), 0.0);
/// let solution = search
///     .solve_initial(&topology, fleet, &tasks, &mut scope, &StepCountTermination::new(50))
///     .unwrap();
///
/// assert_eq!(solution.task_count(), 2);
/// assert!(solution.total_cost() <= 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch {
    generator: NeighborhoodGenerator,
    diversification_probability: f64,
    return_policy: ReturnPolicy,
}

impl LocalSearch {
    pub fn new(generator: NeighborhoodGenerator, diversification_probability: f64) -> Self {
        Self {
            generator,
            diversification_probability,
            return_policy: ReturnPolicy::default(),
        }
    }

    pub fn with_return_policy(mut self, policy: ReturnPolicy) -> Self {
        self.return_policy = policy;
        self
    }

    pub fn return_policy(&self) -> ReturnPolicy {
        self.return_policy
    }

    pub fn diversification_probability(&self) -> f64 {
        self.diversification_probability
    }

    /// Runs from [`Solution::initial`] over `vehicles` and `tasks`.
    pub fn solve_initial<T, Term>(
        &self,
        topology: &T,
        vehicles: Vec<Vehicle>,
        tasks: &[Task],
        scope: &mut SearchScope<'_>,
        termination: &Term,
    ) -> Result<Solution>
    where
        T: Topology + ?Sized,
        Term: Termination,
    {
        let seed = Solution::initial(topology, vehicles, tasks)?;
        Ok(self.solve(topology, seed, scope, termination))
    }

    /// Runs from `seed` until `termination` fires.
    pub fn solve<T, Term>(
        &self,
        topology: &T,
        seed: Solution,
        scope: &mut SearchScope<'_>,
        termination: &Term,
    ) -> Solution
    where
        T: Topology + ?Sized,
        Term: Termination,
    {
        self.solve_observed(topology, seed, scope, termination, |_| {})
    }

    /// Like [`solve`](Self::solve), calling `observer` after every step.
    pub fn solve_observed<T, Term, F>(
        &self,
        topology: &T,
        seed: Solution,
        scope: &mut SearchScope<'_>,
        termination: &Term,
        mut observer: F,
    ) -> Solution
    where
        T: Topology + ?Sized,
        Term: Termination,
        F: FnMut(&StepReport),
    {
        scope.start_solving();
        debug!(
            event = "local_search_start",
            vehicles = seed.vehicle_count(),
            tasks = seed.task_count(),
            cost = seed.total_cost(),
        );

        let mut incumbent = seed;
        let mut best = incumbent.clone();

        while !termination.is_terminated(scope) {
            let step = scope.increment_step_count();
            let neighbors = self.generator.neighbors(topology, &incumbent, scope.rng());
            scope.stats_mut().record_neighbors(neighbors.len());

            let diversified = scope.rng().random::<f64>() < self.diversification_probability;
            if diversified {
                scope.stats_mut().record_diversification();
            } else if let Some(next) = cheapest(neighbors.iter()) {
                if next.total_cost() <= incumbent.total_cost() {
                    incumbent = next.clone();
                }
            }

            if incumbent.total_cost() < best.total_cost() {
                best = incumbent.clone();
                scope.stats_mut().record_improvement();
            }

            let report = StepReport {
                step,
                incumbent_cost: incumbent.total_cost(),
                best_cost: best.total_cost(),
                neighbor_count: neighbors.len(),
                diversified,
            };
            trace!(
                event = "step",
                step,
                incumbent_cost = report.incumbent_cost,
                best_cost = report.best_cost,
                neighbors = report.neighbor_count,
                diversified,
            );
            if step % PROGRESS_INTERVAL == 0 {
                debug!(
                    event = "progress",
                    step,
                    best_cost = report.best_cost,
                    steps_per_sec = scope.stats().steps_per_second() as u64,
                );
            }
            observer(&report);
        }

        let stats = scope.stats();
        info!(
            event = "local_search_end",
            steps = stats.step_count,
            neighbors = stats.neighbors_generated,
            diversified = stats.diversified_steps,
            improvements = stats.improvements,
            incumbent_cost = incumbent.total_cost(),
            best_cost = best.total_cost(),
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        match self.return_policy {
            ReturnPolicy::BestSeen => best,
            ReturnPolicy::Incumbent => incumbent,
        }
    }
}

/// Lowest total cost, first on ties.
fn cheapest<'a>(solutions: impl Iterator<Item = &'a Solution>) -> Option<&'a Solution> {
    let mut best: Option<&Solution> = None;
    for candidate in solutions {
        if best.map_or(true, |b| candidate.total_cost() < b.total_cost()) {
            best = Some(candidate);
        }
    }
    best
}
