//! Remaining-cost estimates for the exact search.
//!
//! A bounder estimates the distance still to be driven from a state. The
//! search orders its frontier by `cost + estimate`, so an estimate that
//! never overshoots guarantees the first goal dequeued is optimal.

use std::fmt::Debug;

use pdplan_config::BounderType;
use pdplan_core::Topology;

use super::state::SearchState;

/// Estimates the distance left to finish a state.
pub trait RemainingCostBounder: Debug {
    fn remaining_cost<T: Topology + ?Sized>(&self, topology: &T, state: &SearchState) -> f64;
}

/// Greedy chain: from the current city, repeatedly hop to the nearest
/// required city not yet reached and sum the hops.
///
/// Cheap and usually tight, but it can exceed the true remaining distance,
/// so optimality of the first goal found is not guaranteed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborBounder;

impl RemainingCostBounder for NearestNeighborBounder {
    fn remaining_cost<T: Topology + ?Sized>(&self, topology: &T, state: &SearchState) -> f64 {
        let mut remaining = state.required_cities();
        let mut current = state.city();
        let mut total = 0.0;
        while !remaining.is_empty() {
            let mut nearest = 0;
            let mut nearest_distance = topology.distance(current, remaining[0]);
            for (i, city) in remaining.iter().enumerate().skip(1) {
                let d = topology.distance(current, *city);
                if d < nearest_distance {
                    nearest = i;
                    nearest_distance = d;
                }
            }
            total += nearest_distance;
            current = remaining.remove(nearest);
        }
        total
    }
}

/// Weight of a minimum spanning tree (Prim) over the current city and the
/// required cities.
///
/// Any route visiting those cities contains a spanning path, which weighs
/// at least as much as the tree, so this never overshoots on metric
/// distances.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumSpanningTreeBounder;

impl RemainingCostBounder for MinimumSpanningTreeBounder {
    fn remaining_cost<T: Topology + ?Sized>(&self, topology: &T, state: &SearchState) -> f64 {
        let mut outside = state.required_cities();
        if outside.is_empty() {
            return 0.0;
        }
        let mut link: Vec<f64> = outside
            .iter()
            .map(|c| topology.distance(state.city(), *c))
            .collect();
        let mut total = 0.0;
        while !outside.is_empty() {
            let mut closest = 0;
            for i in 1..link.len() {
                if link[i] < link[closest] {
                    closest = i;
                }
            }
            total += link.swap_remove(closest);
            let joined = outside.swap_remove(closest);
            for (i, city) in outside.iter().enumerate() {
                let d = topology.distance(joined, *city);
                if d < link[i] {
                    link[i] = d;
                }
            }
        }
        total
    }
}

/// Always zero: plain uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroBounder;

impl RemainingCostBounder for ZeroBounder {
    fn remaining_cost<T: Topology + ?Sized>(&self, _topology: &T, _state: &SearchState) -> f64 {
        0.0
    }
}

/// Bounder chosen at runtime from configuration.
#[derive(Debug, Clone, Copy)]
pub enum AnyBounder {
    NearestNeighbor(NearestNeighborBounder),
    MinimumSpanningTree(MinimumSpanningTreeBounder),
    Zero(ZeroBounder),
}

impl Default for AnyBounder {
    fn default() -> Self {
        AnyBounder::NearestNeighbor(NearestNeighborBounder)
    }
}

impl From<BounderType> for AnyBounder {
    fn from(kind: BounderType) -> Self {
        match kind {
            BounderType::NearestNeighbor => AnyBounder::NearestNeighbor(NearestNeighborBounder),
            BounderType::MinimumSpanningTree => {
                AnyBounder::MinimumSpanningTree(MinimumSpanningTreeBounder)
            }
            BounderType::Zero => AnyBounder::Zero(ZeroBounder),
        }
    }
}

impl RemainingCostBounder for AnyBounder {
    fn remaining_cost<T: Topology + ?Sized>(&self, topology: &T, state: &SearchState) -> f64 {
        match self {
            AnyBounder::NearestNeighbor(b) => b.remaining_cost(topology, state),
            AnyBounder::MinimumSpanningTree(b) => b.remaining_cost(topology, state),
            AnyBounder::Zero(b) => b.remaining_cost(topology, state),
        }
    }
}
