//! Vehicle and task factories.

use pdplan_core::{CityId, Task, Vehicle};

/// A vehicle named `v{index}` with unit cost per distance.
pub fn vehicle(index: usize, capacity: u32, home: CityId) -> Vehicle {
    Vehicle::new(format!("v{index}"), capacity, 1.0, home)
}

/// Shorthand for [`Task::new`].
pub fn task(id: u32, pickup: CityId, delivery: CityId, weight: u32) -> Task {
    Task::new(id, pickup, delivery, weight)
}
