//! pdplan Core - Core types for pickup-and-delivery routing
//!
//! This crate provides the fundamental abstractions shared by the solver:
//! - Domain value types (cities, tasks, vehicles, pickup/delivery actions)
//! - The [`Topology`] collaborator and a graph-backed implementation
//! - The route cost model and capacity feasibility check
//! - Expansion of routes into primitive move/pickup/delivery plans

pub mod cost;
pub mod domain;
pub mod error;
pub mod plan;
pub mod topology;

pub use cost::{is_feasible, is_well_paired, route_cost, route_distance};
pub use domain::{CityId, PdAction, Task, TaskId, Vehicle};
pub use error::{Result, RoutingError};
pub use plan::{PlanAction, VehiclePlan};
pub use topology::{GraphTopology, GraphTopologyBuilder, Topology};
