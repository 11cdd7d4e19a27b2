//! Search scope.
//!
//! A scope lives for one search run. It borrows the planner's random
//! number generator so that every random decision of a planner instance
//! comes from one seedable stream.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::stats::SearchStats;

/// Creates the generator behind a planner: seeded when `seed` is given,
/// otherwise from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Per-run state shared between an engine and its terminations.
pub struct SearchScope<'r> {
    rng: &'r mut ChaCha8Rng,
    start_time: Option<Instant>,
    step_count: u64,
    stats: SearchStats,
}

impl<'r> SearchScope<'r> {
    pub fn new(rng: &'r mut ChaCha8Rng) -> Self {
        Self {
            rng,
            start_time: None,
            step_count: 0,
            stats: SearchStats::default(),
        }
    }

    /// Starts the clock and resets the step counter.
    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.step_count = 0;
        self.stats.start();
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut *self.rng
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.step_count += 1;
        self.stats.record_step();
        self.step_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }
}

impl std::fmt::Debug for SearchScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchScope")
            .field("start_time", &self.start_time)
            .field("step_count", &self.step_count)
            .field("stats", &self.stats)
            .finish()
    }
}
