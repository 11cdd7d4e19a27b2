//! Multi-vehicle solutions.
//!
//! A [`Solution`] is an immutable snapshot: one route and one task list per
//! vehicle plus cached costs. Deriving a neighbor replaces the entries of
//! the vehicles that changed and shares the rest through `Arc`.

use std::sync::Arc;

use pdplan_core::{is_feasible, route_cost, PdAction, Result, RoutingError, Task, Topology, Vehicle};

#[derive(Debug, Clone)]
pub struct Solution {
    vehicles: Arc<[Vehicle]>,
    routes: Vec<Arc<[PdAction]>>,
    tasks: Vec<Arc<[Task]>>,
    costs: Vec<f64>,
    total_cost: f64,
}

impl Solution {
    /// Puts every task on the vehicle with the largest capacity (the first
    /// one on ties), each served by a pickup immediately followed by its
    /// delivery, in input order.
    ///
    /// # Errors
    ///
    /// `InvalidState` without vehicles; `Unservable` if a task outweighs
    /// the largest vehicle.
    pub fn initial<T: Topology + ?Sized>(
        topology: &T,
        vehicles: impl Into<Arc<[Vehicle]>>,
        tasks: &[Task],
    ) -> Result<Self> {
        let vehicles = vehicles.into();
        let largest = largest_vehicle(&vehicles).ok_or_else(|| {
            RoutingError::InvalidState("solution needs at least one vehicle".to_string())
        })?;
        if let Some(task) = tasks.iter().find(|t| !vehicles[largest].can_carry(t)) {
            return Err(RoutingError::Unservable {
                task: task.id,
                weight: task.weight,
            });
        }

        let mut routes = vec![Vec::new(); vehicles.len()];
        routes[largest] = tasks
            .iter()
            .flat_map(|t| [PdAction::Pickup(*t), PdAction::Delivery(*t)])
            .collect();
        Ok(Self::from_routes(topology, vehicles, routes))
    }

    /// Builds a solution from explicit routes, one per vehicle. Each
    /// vehicle's task list follows the order of its pickups.
    pub fn from_routes<T: Topology + ?Sized>(
        topology: &T,
        vehicles: impl Into<Arc<[Vehicle]>>,
        routes: Vec<Vec<PdAction>>,
    ) -> Self {
        let tasks = routes.iter().map(|r| tasks_of(r)).collect();
        Self::from_assignments(topology, vehicles, routes, tasks)
    }

    /// Builds a solution from routes and task lists given side by side.
    ///
    /// The task order matters to the neighborhood: reassignment moves a
    /// vehicle's first task, and a lone vehicle reorders its last one.
    pub fn from_assignments<T: Topology + ?Sized>(
        topology: &T,
        vehicles: impl Into<Arc<[Vehicle]>>,
        routes: Vec<Vec<PdAction>>,
        tasks: Vec<Vec<Task>>,
    ) -> Self {
        let vehicles = vehicles.into();
        debug_assert_eq!(vehicles.len(), routes.len());
        debug_assert_eq!(vehicles.len(), tasks.len());
        let costs: Vec<f64> = vehicles
            .iter()
            .zip(&routes)
            .map(|(v, r)| route_cost(topology, v, r))
            .collect();
        Self {
            total_cost: costs.iter().sum(),
            vehicles,
            routes: routes.into_iter().map(Arc::from).collect(),
            tasks: tasks.into_iter().map(Arc::from).collect(),
            costs,
        }
    }

    /// A one-vehicle solution around `route`.
    pub fn single_vehicle<T: Topology + ?Sized>(
        topology: &T,
        vehicle: Vehicle,
        route: Vec<PdAction>,
    ) -> Self {
        Self::from_routes(topology, vec![vehicle], vec![route])
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn route(&self, vehicle: usize) -> &[PdAction] {
        &self.routes[vehicle]
    }

    pub fn tasks(&self, vehicle: usize) -> &[Task] {
        &self.tasks[vehicle]
    }

    pub fn cost(&self, vehicle: usize) -> f64 {
        self.costs[vehicle]
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn task_count(&self) -> usize {
        self.tasks.iter().map(|t| t.len()).sum()
    }

    /// True when every route respects its vehicle's capacity.
    pub fn is_feasible(&self) -> bool {
        self.vehicles
            .iter()
            .zip(&self.routes)
            .all(|(v, r)| is_feasible(r, v.capacity))
    }

    /// A copy with the given vehicles' routes and task lists replaced;
    /// only their costs are recomputed.
    pub fn with_changes<T: Topology + ?Sized>(
        &self,
        topology: &T,
        changes: impl IntoIterator<Item = (usize, Vec<PdAction>, Vec<Task>)>,
    ) -> Self {
        let mut next = self.clone();
        for (vehicle, route, tasks) in changes {
            let cost = route_cost(topology, &self.vehicles[vehicle], &route);
            next.total_cost += cost - next.costs[vehicle];
            next.costs[vehicle] = cost;
            next.routes[vehicle] = route.into();
            next.tasks[vehicle] = tasks.into();
        }
        next
    }

    /// Owned copies of all routes, in vehicle order.
    pub fn routes(&self) -> Vec<Vec<PdAction>> {
        self.routes.iter().map(|r| r.to_vec()).collect()
    }

    pub(crate) fn shares_route_with(&self, other: &Solution, vehicle: usize) -> bool {
        Arc::ptr_eq(&self.routes[vehicle], &other.routes[vehicle])
    }
}

/// Index of the vehicle with the largest capacity, first on ties.
pub fn largest_vehicle(vehicles: &[Vehicle]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in vehicles.iter().enumerate() {
        if best.map_or(true, |b| v.capacity > vehicles[b].capacity) {
            best = Some(i);
        }
    }
    best
}

fn tasks_of(route: &[PdAction]) -> Vec<Task> {
    route
        .iter()
        .filter_map(|a| match a {
            PdAction::Pickup(task) => Some(*task),
            PdAction::Delivery(_) => None,
        })
        .collect()
}
