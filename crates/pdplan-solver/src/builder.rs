//! Builder module for constructing search components from configuration
//!
//! This module provides the wiring between `pdplan-config` types and the
//! engines of this crate.

use std::time::Duration;

use pdplan_config::{ExactSearchConfig, LocalSearchConfig};

use crate::exact::{AnyBounder, ExactSearch};
use crate::local_search::LocalSearch;
use crate::neighborhood::NeighborhoodGenerator;
use crate::termination::{OrTermination, StepCountTermination, TimeTermination};

/// Termination used for every planner search: the time budget, plus an
/// optional step cap.
pub type BudgetTermination = OrTermination<(TimeTermination, Option<StepCountTermination>)>;

/// Builder for constructing engines from configuration.
pub struct SearchBuilder;

impl SearchBuilder {
    /// Builds the exact search with the configured bounder and node limit.
    pub fn exact_search(config: &ExactSearchConfig) -> ExactSearch<AnyBounder> {
        ExactSearch::new(AnyBounder::from(config.bounder)).with_node_limit(config.node_limit)
    }

    /// Builds the local search with the configured neighborhood,
    /// diversification and return policy.
    pub fn local_search(config: &LocalSearchConfig) -> LocalSearch {
        LocalSearch::new(
            NeighborhoodGenerator::new(config.reorder_samples),
            config.diversification_probability,
        )
        .with_return_policy(config.return_policy)
    }

    /// Stops after `budget`, or after `step_limit` steps when set.
    pub fn termination(budget: Duration, step_limit: Option<u64>) -> BudgetTermination {
        OrTermination::new((
            TimeTermination::new(budget),
            step_limit.map(StepCountTermination::new),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdplan_config::{BounderType, PlannerConfig, ReturnPolicy};

    #[test]
    fn test_exact_search_from_config() {
        let mut config = PlannerConfig::new();
        config.exact_search.bounder = BounderType::MinimumSpanningTree;
        let search = SearchBuilder::exact_search(&config.exact_search);
        assert!(matches!(search.bounder(), AnyBounder::MinimumSpanningTree(_)));
    }

    #[test]
    fn test_local_search_from_config() {
        let config = PlannerConfig::new()
            .with_diversification_probability(0.5)
            .with_return_policy(ReturnPolicy::Incumbent);
        let search = SearchBuilder::local_search(&config.local_search);
        assert_eq!(search.diversification_probability(), 0.5);
        assert_eq!(search.return_policy(), ReturnPolicy::Incumbent);
    }

    #[test]
    fn test_termination_carries_budget() {
        let termination = SearchBuilder::termination(Duration::from_millis(300), None);
        assert_eq!((termination.0).0.limit(), Duration::from_millis(300));
        assert!((termination.0).1.is_none());
    }
}
