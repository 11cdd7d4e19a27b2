//! pdplan solver engine
//!
//! This crate provides the search machinery behind the routing planner:
//! - Exact best-first search over single-vehicle states
//! - Multi-vehicle solutions and their neighborhoods
//! - Stochastic local search with diversification
//! - Termination conditions and search statistics
//! - The stateful estimate/commit/finalize planner
//! - Configuration wiring (builder module)

pub mod builder;
pub mod exact;
pub mod local_search;
pub mod neighborhood;
pub mod planner;
pub mod scope;
pub mod solution;
pub mod stats;
pub mod termination;

pub use builder::{BudgetTermination, SearchBuilder};
pub use exact::{
    AnyBounder, ExactSearch, MinimumSpanningTreeBounder, NearestNeighborBounder,
    RemainingCostBounder, SearchOutcome, SearchState, StateKey, ZeroBounder,
};
pub use local_search::{LocalSearch, StepReport};
pub use neighborhood::{NeighborhoodGenerator, ReassignMove, ReorderMove};
pub use planner::{EstimateMethod, MarginalCostEstimate, RoutingPlanner, VehicleEstimate};
pub use scope::{seeded_rng, SearchScope};
pub use solution::Solution;
pub use stats::SearchStats;
pub use termination::{OrTermination, StepCountTermination, Termination, TimeTermination};
