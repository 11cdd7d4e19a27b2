//! Shared test fixtures for pdplan crates.
//!
//! This crate provides topologies, fleets and a brute-force reference
//! solver for tests. It only depends on `pdplan-core`.
//!
//! - [`topology`] - line, grid and euclidean city graphs
//! - [`fleet`] - vehicle and task factories
//! - [`brute_force`] - exhaustive single-vehicle reference routes
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! pdplan-test = { workspace = true }
//! ```

pub mod brute_force;
pub mod fleet;
pub mod topology;

pub use brute_force::{assert_valid_route, best_route};
pub use fleet::{task, vehicle};
pub use topology::{euclidean_topology, grid_topology, line_topology};
