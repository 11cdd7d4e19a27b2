//! Error types for pdplan

use thiserror::Error;

use crate::domain::TaskId;

/// Main error type for routing operations
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The topology is malformed (unknown city, bad road length, disconnected graph)
    #[error("Topology error: {0}")]
    Topology(String),

    /// No vehicle of the fleet can carry the task
    #[error("Task {task} weighs {weight}, more than any vehicle can carry")]
    Unservable { task: TaskId, weight: u32 },

    /// A commit was requested while no estimate is outstanding
    #[error("No pending estimate to commit")]
    NoPendingEstimate,

    /// A commit was requested for a task other than the last estimated one
    #[error("Commit of task {got} does not match the pending estimate for task {expected}")]
    EstimateMismatch { expected: TaskId, got: TaskId },

    /// The planner configuration is out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid operation for the current planner state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;
