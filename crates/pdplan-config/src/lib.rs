//! Configuration system for pdplan.
//!
//! Load planner configuration from TOML or YAML to control time budgets,
//! search thresholds and local search parameters without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use pdplan_config::{PlannerConfig, ReturnPolicy};
//! use std::time::Duration;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [timeouts]
//!     bid_ms = 2000
//!     safety_margin_ms = 200
//!
//!     [local_search]
//!     diversification_probability = 0.1
//!     return_policy = "incumbent"
//! "#).unwrap();
//!
//! assert_eq!(config.timeouts.bid_budget(), Duration::from_millis(1800));
//! assert_eq!(config.local_search.return_policy, ReturnPolicy::Incumbent);
//! assert_eq!(config.exact_search.task_limit, 6);
//! ```
//!
//! Use default config when the file is missing or broken:
//!
//! ```
//! use pdplan_config::PlannerConfig;
//!
//! let config = PlannerConfig::load_or_default("planner.toml");
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Random seed for reproducible searches. `None` seeds from the OS.
    pub random_seed: Option<u64>,

    /// Exact single-vehicle search settings.
    pub exact_search: ExactSearchConfig,

    /// Stochastic local search settings.
    pub local_search: LocalSearchConfig,

    /// Per-decision time budgets.
    pub timeouts: TimeoutConfig,
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file, falling back to defaults.
    ///
    /// Setup problems never reach the routing engine: they are logged and
    /// the default configuration is used instead.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    event = "config_fallback",
                    path = %path.display(),
                    error = %err,
                    "using default planner configuration"
                );
                Self::default()
            }
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the diversification probability of local search.
    pub fn with_diversification_probability(mut self, p: f64) -> Self {
        self.local_search.diversification_probability = p;
        self
    }

    /// Sets the task count below which exact search is used.
    pub fn with_exact_task_limit(mut self, limit: usize) -> Self {
        self.exact_search.task_limit = limit;
        self
    }

    /// Sets the local search return policy.
    pub fn with_return_policy(mut self, policy: ReturnPolicy) -> Self {
        self.local_search.return_policy = policy;
        self
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.local_search.diversification_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid(format!(
                "local_search.diversification_probability must be within [0, 1], got {p}"
            )));
        }
        if self.local_search.reorder_samples == 0 {
            return Err(ConfigError::Invalid(
                "local_search.reorder_samples must be at least 1".to_string(),
            ));
        }
        if self.exact_search.node_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "exact_search.node_limit must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Exact search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ExactSearchConfig {
    /// Exact search is used while a vehicle would hold fewer tasks than this.
    pub task_limit: usize,

    /// Maximum number of expanded states (None = unlimited).
    pub node_limit: Option<u64>,

    /// Remaining-cost estimate guiding the search.
    pub bounder: BounderType,
}

impl Default for ExactSearchConfig {
    fn default() -> Self {
        Self {
            task_limit: 6,
            node_limit: None,
            bounder: BounderType::NearestNeighbor,
        }
    }
}

/// Remaining-cost estimates available to the exact search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BounderType {
    /// Greedy nearest-neighbor chain through the cities still to visit.
    #[default]
    NearestNeighbor,

    /// Minimum spanning tree over the current and remaining cities.
    MinimumSpanningTree,

    /// No estimate (uniform-cost search).
    Zero,
}

/// Local search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Probability of keeping the incumbent for a step.
    pub diversification_probability: f64,

    /// Reorder neighbors drawn per qualifying vehicle and step.
    pub reorder_samples: usize,

    /// Which solution a finished search hands back.
    pub return_policy: ReturnPolicy,

    /// Maximum number of steps (None = until the deadline).
    pub step_limit: Option<u64>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            diversification_probability: 0.2,
            reorder_samples: 10,
            return_policy: ReturnPolicy::BestSeen,
            step_limit: None,
        }
    }
}

/// Solution returned when local search terminates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnPolicy {
    /// Cheapest solution encountered during the run.
    #[default]
    BestSeen,

    /// Whatever the incumbent is when the deadline hits.
    Incumbent,
}

/// Time budget configuration, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TimeoutConfig {
    /// Budget for one marginal-cost estimate.
    pub bid_ms: u64,

    /// Budget for computing the final plans.
    pub plan_ms: u64,

    /// Kept in reserve from every budget for bookkeeping around the search.
    pub safety_margin_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            bid_ms: 5_000,
            plan_ms: 10_000,
            safety_margin_ms: 200,
        }
    }
}

impl TimeoutConfig {
    /// Search budget of one estimate, margin deducted.
    pub fn bid_budget(&self) -> Duration {
        Duration::from_millis(self.bid_ms.saturating_sub(self.safety_margin_ms))
    }

    /// Search budget of the final planning, margin deducted.
    pub fn plan_budget(&self) -> Duration {
        Duration::from_millis(self.plan_ms.saturating_sub(self.safety_margin_ms))
    }
}
