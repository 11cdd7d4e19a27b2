//! Exact best-first search for a single vehicle.
//!
//! Explores pickup/delivery interleavings ordered by distance so far plus
//! a [`RemainingCostBounder`] estimate, and returns the first complete
//! route it dequeues. Equal states reached at equal or higher cost are not
//! expanded again.

mod bounder;
mod state;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use pdplan_core::{route_cost, PdAction, Result, RoutingError, Task, Topology, Vehicle};

use crate::scope::SearchScope;
use crate::termination::Termination;

pub use bounder::{
    AnyBounder, MinimumSpanningTreeBounder, NearestNeighborBounder, RemainingCostBounder,
    ZeroBounder,
};
pub use state::{SearchState, StateKey};

/// How an exact search run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A complete route and its cost for the vehicle.
    Found { route: Vec<PdAction>, cost: f64 },

    /// Deadline or node limit reached before a goal was dequeued.
    Interrupted,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

#[derive(Debug)]
struct SearchNode {
    state: SearchState,
    action: Option<PdAction>,
    parent: Option<usize>,
}

/// Frontier entry; the heap pops the lowest priority, oldest first.
#[derive(Debug)]
struct PriorityNode {
    priority: f64,
    index: usize,
}

impl PartialEq for PriorityNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityNode {}

impl PartialOrd for PriorityNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Best-first search over [`SearchState`]s.
///
/// # Example
///
/// ```
/// use pdplan_core::{GraphTopology, Task, Vehicle};
/// use pdplan_solver::exact::{ExactSearch, NearestNeighborBounder, SearchOutcome};
/// use pdplan_solver::scope::{seeded_rng, SearchScope};
/// use pdplan_solver::termination::TimeTermination;
///
/// let mut builder = GraphTopology::builder();
/// let a = builder.add_city("A");
/// let b = builder.add_city("B");
/// builder.add_road(a, b, 2.0);
/// let topology = builder.build().unwrap();
///
/// let vehicle = Vehicle::new("truck", 5, 1.0, a);
/// let tasks = [Task::new(1, a, b, 3)];
///
/// let mut rng = seeded_rng(Some(0));
/// let mut scope = SearchScope::new(&mut rng);
/// let search = ExactSearch::new(NearestNeighborBounder);
/// let outcome = search
///     .solve(&topology, &vehicle, &tasks, &mut scope, &TimeTermination::millis(1000))
///     .unwrap();
///
/// match outcome {
///     SearchOutcome::Found { route, cost } => {
///         assert_eq!(route.len(), 2);
///         assert_eq!(cost, 2.0);
///     }
///     SearchOutcome::Interrupted => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ExactSearch<B> {
    bounder: B,
    node_limit: Option<u64>,
}

impl<B: RemainingCostBounder> ExactSearch<B> {
    pub fn new(bounder: B) -> Self {
        Self {
            bounder,
            node_limit: None,
        }
    }

    /// Caps the number of expanded states.
    pub fn with_node_limit(mut self, limit: Option<u64>) -> Self {
        self.node_limit = limit;
        self
    }

    pub fn bounder(&self) -> &B {
        &self.bounder
    }

    /// Finds a route serving every task in `tasks` with `vehicle`, starting
    /// empty at its home city.
    ///
    /// # Errors
    ///
    /// `Unservable` if a task is heavier than the vehicle's capacity;
    /// `Internal` if the frontier runs dry without reaching a goal.
    pub fn solve<T, Term>(
        &self,
        topology: &T,
        vehicle: &Vehicle,
        tasks: &[Task],
        scope: &mut SearchScope<'_>,
        termination: &Term,
    ) -> Result<SearchOutcome>
    where
        T: Topology + ?Sized,
        Term: Termination,
    {
        if let Some(task) = tasks.iter().find(|t| !vehicle.can_carry(t)) {
            return Err(RoutingError::Unservable {
                task: task.id,
                weight: task.weight,
            });
        }

        scope.start_solving();
        let root = SearchState::root(vehicle.home_city, vehicle.capacity, tasks);
        let root_priority = self.bounder.remaining_cost(topology, &root);

        let mut nodes = vec![SearchNode {
            state: root,
            action: None,
            parent: None,
        }];
        let mut frontier = BinaryHeap::new();
        frontier.push(PriorityNode {
            priority: root_priority,
            index: 0,
        });
        let mut best_cost: HashMap<StateKey, f64> = HashMap::new();
        let mut expanded: u64 = 0;

        while let Some(entry) = frontier.pop() {
            let node = &nodes[entry.index];

            if node.state.is_goal() {
                let route = reconstruct(&nodes, entry.index);
                let cost = route_cost(topology, vehicle, &route);
                debug!(
                    event = "exact_search_end",
                    vehicle = %vehicle.name,
                    tasks = tasks.len(),
                    nodes_expanded = expanded,
                    nodes_generated = nodes.len(),
                    cost,
                );
                return Ok(SearchOutcome::Found { route, cost });
            }

            if termination.is_terminated(scope) || self.node_limit.is_some_and(|l| expanded >= l) {
                debug!(
                    event = "exact_search_interrupted",
                    vehicle = %vehicle.name,
                    tasks = tasks.len(),
                    nodes_expanded = expanded,
                );
                return Ok(SearchOutcome::Interrupted);
            }

            let key = node.state.key();
            if best_cost.get(&key).is_some_and(|seen| node.state.cost() >= *seen) {
                continue;
            }
            best_cost.insert(key, node.state.cost());

            expanded += 1;
            scope.stats_mut().record_expansion();
            let successors = node.state.successors(topology);
            scope.stats_mut().record_generated(successors.len());
            trace!(
                event = "exact_expand",
                city = %nodes[entry.index].state.city(),
                cost = nodes[entry.index].state.cost(),
                children = successors.len(),
            );

            for (action, state) in successors {
                let priority = state.cost() + self.bounder.remaining_cost(topology, &state);
                let index = nodes.len();
                nodes.push(SearchNode {
                    state,
                    action: Some(action),
                    parent: Some(entry.index),
                });
                frontier.push(PriorityNode { priority, index });
            }
        }

        Err(RoutingError::Internal(format!(
            "exact search for {} exhausted its frontier after {expanded} expansions",
            vehicle.name
        )))
    }
}

fn reconstruct(nodes: &[SearchNode], mut index: usize) -> Vec<PdAction> {
    let mut route = Vec::new();
    while let Some(action) = nodes[index].action {
        route.push(action);
        match nodes[index].parent {
            Some(parent) => index = parent,
            None => break,
        }
    }
    route.reverse();
    route
}
