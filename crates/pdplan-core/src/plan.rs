//! Primitive plans handed to the execution collaborator.
//!
//! A route is a sequence of [`PdAction`]s; executing it requires the
//! intermediate moves along the road network. [`VehiclePlan::expand`]
//! produces that primitive sequence.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::domain::{CityId, PdAction, TaskId, Vehicle};
use crate::topology::Topology;

/// A primitive step of an executable plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlanAction {
    /// Drive to an adjacent city.
    Move(CityId),
    Pickup(TaskId),
    Delivery(TaskId),
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanAction::Move(city) => write!(f, "move {city}"),
            PlanAction::Pickup(task) => write!(f, "pickup {task}"),
            PlanAction::Delivery(task) => write!(f, "deliver {task}"),
        }
    }
}

/// Executable plan of one vehicle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehiclePlan {
    pub vehicle: String,
    pub start: CityId,
    pub actions: Vec<PlanAction>,
}

impl VehiclePlan {
    /// Expands a route into moves along shortest paths plus the
    /// pickup/delivery steps themselves.
    ///
    /// # Example
    ///
    /// ```
    /// use pdplan_core::{CityId, GraphTopology, PdAction, PlanAction, Task, Vehicle, VehiclePlan};
    ///
    /// let mut builder = GraphTopology::builder();
    /// let a = builder.add_city("A");
    /// let b = builder.add_city("B");
    /// let c = builder.add_city("C");
    /// builder.add_road(a, b, 1.0).add_road(b, c, 1.0);
    /// let topology = builder.build().unwrap();
    ///
    /// let task = Task::new(4, b, c, 1);
    /// let vehicle = Vehicle::new("truck", 3, 1.0, a);
    /// let route = [PdAction::Pickup(task), PdAction::Delivery(task)];
    /// let plan = VehiclePlan::expand(&topology, &vehicle, &route);
    ///
    /// assert_eq!(plan.actions, vec![
    ///     PlanAction::Move(b),
    ///     PlanAction::Pickup(task.id),
    ///     PlanAction::Move(c),
    ///     PlanAction::Delivery(task.id),
    /// ]);
    /// ```
    pub fn expand<T: Topology + ?Sized>(
        topology: &T,
        vehicle: &Vehicle,
        route: &[PdAction],
    ) -> Self {
        let mut actions = Vec::with_capacity(route.len() * 2);
        let mut current = vehicle.home_city;
        for action in route {
            let next = action.city();
            actions.extend(topology.path(current, next).into_iter().map(PlanAction::Move));
            actions.push(match action {
                PdAction::Pickup(task) => PlanAction::Pickup(task.id),
                PdAction::Delivery(task) => PlanAction::Delivery(task.id),
            });
            current = next;
        }
        Self {
            vehicle: vehicle.name.clone(),
            start: vehicle.home_city,
            actions,
        }
    }

    /// An empty plan that keeps the vehicle parked.
    pub fn idle(vehicle: &Vehicle) -> Self {
        Self {
            vehicle: vehicle.name.clone(),
            start: vehicle.home_city,
            actions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Distance driven by the moves of this plan.
    pub fn total_distance<T: Topology + ?Sized>(&self, topology: &T) -> f64 {
        let mut current = self.start;
        let mut total = 0.0;
        for action in &self.actions {
            if let PlanAction::Move(city) = action {
                total += topology.distance(current, *city);
                current = *city;
            }
        }
        total
    }
}
