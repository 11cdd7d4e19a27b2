//! Domain value types for pickup-and-delivery routing.
//!
//! - [`CityId`]: a node of the topology
//! - [`Task`]: an immutable transport request, identified by [`TaskId`]
//! - [`Vehicle`]: a member of the fixed fleet
//! - [`PdAction`]: a pickup or a delivery of one task inside a route

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a city in a [`Topology`](crate::Topology).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CityId(pub usize);

impl CityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city#{}", self.0)
    }
}

/// Stable task identifier. The same id always denotes the same task,
/// even when the task record is delivered again in a later round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transport request: carry `weight` units from `pickup` to `delivery`.
///
/// # Example
///
/// ```
/// use pdplan_core::{CityId, Task};
///
/// let task = Task::new(7, CityId(0), CityId(3), 2);
/// assert_eq!(task.id.0, 7);
/// assert_eq!(task.weight, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task {
    pub id: TaskId,
    pub pickup: CityId,
    pub delivery: CityId,
    pub weight: u32,
}

impl Task {
    pub fn new(id: u32, pickup: CityId, delivery: CityId, weight: u32) -> Self {
        Self {
            id: TaskId(id),
            pickup,
            delivery,
            weight,
        }
    }
}

/// A vehicle of the fleet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vehicle {
    /// Display name, used in logs and emitted plans.
    pub name: String,
    /// Load units the vehicle can carry at once.
    pub capacity: u32,
    /// Cost of one distance unit travelled.
    pub cost_per_km: f64,
    /// City the vehicle's routes start from.
    pub home_city: CityId,
}

impl Vehicle {
    pub fn new(
        name: impl Into<String>,
        capacity: u32,
        cost_per_km: f64,
        home_city: CityId,
    ) -> Self {
        Self {
            name: name.into(),
            capacity,
            cost_per_km,
            home_city,
        }
    }

    /// Returns true if the vehicle could carry `task` on its own.
    #[inline]
    pub fn can_carry(&self, task: &Task) -> bool {
        self.capacity >= task.weight
    }
}

/// One step of a vehicle route: picking a task up or delivering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PdAction {
    Pickup(Task),
    Delivery(Task),
}

impl PdAction {
    #[inline]
    pub fn task(&self) -> &Task {
        match self {
            PdAction::Pickup(task) | PdAction::Delivery(task) => task,
        }
    }

    #[inline]
    pub fn task_id(&self) -> TaskId {
        self.task().id
    }

    #[inline]
    pub fn is_pickup(&self) -> bool {
        matches!(self, PdAction::Pickup(_))
    }

    /// City the vehicle has to be in to perform this action.
    #[inline]
    pub fn city(&self) -> CityId {
        match self {
            PdAction::Pickup(task) => task.pickup,
            PdAction::Delivery(task) => task.delivery,
        }
    }

    /// Change of free capacity caused by this action.
    #[inline]
    pub fn capacity_delta(&self) -> i64 {
        match self {
            PdAction::Pickup(task) => -i64::from(task.weight),
            PdAction::Delivery(task) => i64::from(task.weight),
        }
    }

    /// Replaces the carried task record, keeping the action kind.
    pub fn with_task(self, task: Task) -> Self {
        match self {
            PdAction::Pickup(_) => PdAction::Pickup(task),
            PdAction::Delivery(_) => PdAction::Delivery(task),
        }
    }
}

impl fmt::Display for PdAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdAction::Pickup(task) => write!(f, "P{}", task.id),
            PdAction::Delivery(task) => write!(f, "D{}", task.id),
        }
    }
}

#[cfg(test)]
mod tests;
