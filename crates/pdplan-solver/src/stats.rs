//! Search statistics.
//!
//! Plain counters for one search run, recorded through the
//! [`SearchScope`](crate::scope::SearchScope) and logged when the run ends.

use std::time::{Duration, Instant};

/// Counters for a single exact or local search run.
///
/// # Example
///
/// ```
/// use pdplan_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_step();
/// stats.record_neighbors(12);
/// stats.record_diversification();
///
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.neighbors_generated, 12);
/// assert_eq!(stats.diversified_steps, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    start_time: Option<Instant>,
    /// Local search steps taken.
    pub step_count: u64,
    /// Neighbor solutions generated across all steps.
    pub neighbors_generated: u64,
    /// Steps that kept the incumbent on purpose.
    pub diversified_steps: u64,
    /// Times the best-seen cost strictly improved.
    pub improvements: u64,
    /// Exact search states expanded.
    pub nodes_expanded: u64,
    /// Exact search states pushed onto the frontier.
    pub nodes_generated: u64,
}

impl SearchStats {
    /// Marks the start of the run.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    pub fn record_neighbors(&mut self, count: usize) {
        self.neighbors_generated += count as u64;
    }

    pub fn record_diversification(&mut self) {
        self.diversified_steps += 1;
    }

    pub fn record_improvement(&mut self) {
        self.improvements += 1;
    }

    pub fn record_expansion(&mut self) {
        self.nodes_expanded += 1;
    }

    pub fn record_generated(&mut self, count: usize) {
        self.nodes_generated += count as u64;
    }

    /// Returns the steps per second rate.
    pub fn steps_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.step_count as f64 / secs
        } else {
            0.0
        }
    }

    /// Share of steps that were diversified.
    pub fn diversification_rate(&self) -> f64 {
        if self.step_count == 0 {
            0.0
        } else {
            self.diversified_steps as f64 / self.step_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_on_empty_stats() {
        let stats = SearchStats::default();
        assert_eq!(stats.elapsed(), Duration::ZERO);
        assert_eq!(stats.steps_per_second(), 0.0);
        assert_eq!(stats.diversification_rate(), 0.0);
    }

    #[test]
    fn test_diversification_rate() {
        let mut stats = SearchStats::default();
        for _ in 0..4 {
            stats.record_step();
        }
        stats.record_diversification();
        assert_eq!(stats.diversification_rate(), 0.25);
    }

    #[test]
    fn test_node_counters() {
        let mut stats = SearchStats::default();
        stats.record_expansion();
        stats.record_generated(3);
        stats.record_generated(2);
        assert_eq!(stats.nodes_expanded, 1);
        assert_eq!(stats.nodes_generated, 5);
    }
}
