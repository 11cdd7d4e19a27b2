//! Single-vehicle search states.

use pdplan_core::{CityId, PdAction, Task, TaskId, Topology};

/// Snapshot of one vehicle partway through serving a task set.
///
/// `carried` and `available` are kept sorted by task id so that equal
/// situations reached along different paths compare equal.
#[derive(Debug, Clone)]
pub struct SearchState {
    city: CityId,
    carried: Vec<Task>,
    available: Vec<Task>,
    free_capacity: u32,
    cost: f64,
}

/// Canonical identity of a state, ignoring the cost paid to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    city: CityId,
    carried: Vec<TaskId>,
    available: Vec<TaskId>,
}

impl SearchState {
    /// The empty vehicle at `start` with every task still to pick up.
    pub fn root(start: CityId, capacity: u32, tasks: &[Task]) -> Self {
        let mut available = tasks.to_vec();
        available.sort_by_key(|t| t.id);
        Self {
            city: start,
            carried: Vec::new(),
            available,
            free_capacity: capacity,
            cost: 0.0,
        }
    }

    pub fn city(&self) -> CityId {
        self.city
    }

    pub fn carried(&self) -> &[Task] {
        &self.carried
    }

    pub fn available(&self) -> &[Task] {
        &self.available
    }

    pub fn free_capacity(&self) -> u32 {
        self.free_capacity
    }

    /// Distance travelled so far.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn is_goal(&self) -> bool {
        self.carried.is_empty() && self.available.is_empty()
    }

    pub fn key(&self) -> StateKey {
        StateKey {
            city: self.city,
            carried: self.carried.iter().map(|t| t.id).collect(),
            available: self.available.iter().map(|t| t.id).collect(),
        }
    }

    /// Cities that must still be visited, without duplicates and without
    /// the current city.
    pub fn required_cities(&self) -> Vec<CityId> {
        let mut cities = Vec::with_capacity(self.carried.len() + self.available.len() * 2);
        let wanted = self
            .carried
            .iter()
            .map(|t| t.delivery)
            .chain(self.available.iter().flat_map(|t| [t.pickup, t.delivery]));
        for city in wanted {
            if city != self.city && !cities.contains(&city) {
                cities.push(city);
            }
        }
        cities
    }

    /// Every state reachable by one action: deliveries of carried tasks
    /// first, then pickups that fit, each in task id order.
    pub fn successors<T: Topology + ?Sized>(&self, topology: &T) -> Vec<(PdAction, SearchState)> {
        let mut children = Vec::with_capacity(self.carried.len() + self.available.len());

        for (i, task) in self.carried.iter().enumerate() {
            let mut carried = self.carried.clone();
            carried.remove(i);
            children.push((
                PdAction::Delivery(*task),
                SearchState {
                    city: task.delivery,
                    carried,
                    available: self.available.clone(),
                    free_capacity: self.free_capacity + task.weight,
                    cost: self.cost + topology.distance(self.city, task.delivery),
                },
            ));
        }

        for (i, task) in self.available.iter().enumerate() {
            if task.weight > self.free_capacity {
                continue;
            }
            let mut available = self.available.clone();
            available.remove(i);
            let mut carried = self.carried.clone();
            let at = carried.partition_point(|t| t.id < task.id);
            carried.insert(at, *task);
            children.push((
                PdAction::Pickup(*task),
                SearchState {
                    city: task.pickup,
                    carried,
                    available,
                    free_capacity: self.free_capacity - task.weight,
                    cost: self.cost + topology.distance(self.city, task.pickup),
                },
            ));
        }

        children
    }
}
