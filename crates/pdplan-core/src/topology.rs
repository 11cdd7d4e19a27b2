//! City graph collaborator.
//!
//! The routing engine only needs pairwise shortest-path distances, the
//! cities along a shortest path, and a city's direct neighbors. Any map
//! provider can implement [`Topology`]; [`GraphTopology`] is a ready-made
//! implementation backed by an all-pairs shortest-path table.

use crate::domain::CityId;
use crate::error::{Result, RoutingError};

/// Read-only view of the road network.
///
/// Implementations must be deterministic and cover a finite city set.
pub trait Topology {
    /// Number of cities.
    fn city_count(&self) -> usize;

    /// Shortest-path distance between two cities (non-negative).
    fn distance(&self, from: CityId, to: CityId) -> f64;

    /// Cities visited when travelling from `from` to `to` along the
    /// canonical shortest path, excluding `from` and including `to`.
    /// Empty when `from == to`.
    fn path(&self, from: CityId, to: CityId) -> Vec<CityId>;

    /// Cities directly connected to `city` by a road.
    fn neighbors(&self, city: CityId) -> Vec<CityId>;
}

impl<T: Topology + ?Sized> Topology for &T {
    fn city_count(&self) -> usize {
        (**self).city_count()
    }

    fn distance(&self, from: CityId, to: CityId) -> f64 {
        (**self).distance(from, to)
    }

    fn path(&self, from: CityId, to: CityId) -> Vec<CityId> {
        (**self).path(from, to)
    }

    fn neighbors(&self, city: CityId) -> Vec<CityId> {
        (**self).neighbors(city)
    }
}

/// Undirected road graph with precomputed shortest paths.
///
/// # Example
///
/// ```
/// use pdplan_core::{GraphTopology, Topology};
///
/// let mut builder = GraphTopology::builder();
/// let a = builder.add_city("Aarau");
/// let b = builder.add_city("Baden");
/// let c = builder.add_city("Chur");
/// builder.add_road(a, b, 3.0).add_road(b, c, 4.0);
/// let topology = builder.build().unwrap();
///
/// assert_eq!(topology.distance(a, c), 7.0);
/// assert_eq!(topology.path(a, c), vec![b, c]);
/// ```
#[derive(Debug, Clone)]
pub struct GraphTopology {
    names: Vec<String>,
    adjacency: Vec<Vec<CityId>>,
    // Row-major city_count x city_count tables.
    dist: Vec<f64>,
    next_hop: Vec<usize>,
}

impl GraphTopology {
    pub fn builder() -> GraphTopologyBuilder {
        GraphTopologyBuilder::default()
    }

    /// Returns the display name of a city.
    pub fn name(&self, city: CityId) -> Option<&str> {
        self.names.get(city.index()).map(String::as_str)
    }

    /// Looks a city up by display name.
    pub fn city_by_name(&self, name: &str) -> Option<CityId> {
        self.names.iter().position(|n| n == name).map(CityId)
    }

    /// Iterates over all cities.
    pub fn cities(&self) -> impl Iterator<Item = CityId> + '_ {
        (0..self.names.len()).map(CityId)
    }

    #[inline]
    fn slot(&self, from: CityId, to: CityId) -> usize {
        from.index() * self.names.len() + to.index()
    }
}

impl Topology for GraphTopology {
    fn city_count(&self) -> usize {
        self.names.len()
    }

    fn distance(&self, from: CityId, to: CityId) -> f64 {
        self.dist[self.slot(from, to)]
    }

    fn path(&self, from: CityId, to: CityId) -> Vec<CityId> {
        let mut path = Vec::new();
        let mut current = from;
        while current != to {
            current = CityId(self.next_hop[self.slot(current, to)]);
            path.push(current);
        }
        path
    }

    fn neighbors(&self, city: CityId) -> Vec<CityId> {
        self.adjacency[city.index()].clone()
    }
}

/// Builder collecting cities and roads before shortest paths are computed.
#[derive(Debug, Clone, Default)]
pub struct GraphTopologyBuilder {
    names: Vec<String>,
    roads: Vec<(CityId, CityId, f64)>,
}

impl GraphTopologyBuilder {
    /// Adds a city and returns its id.
    pub fn add_city(&mut self, name: impl Into<String>) -> CityId {
        self.names.push(name.into());
        CityId(self.names.len() - 1)
    }

    /// Adds an undirected road.
    pub fn add_road(&mut self, a: CityId, b: CityId, length: f64) -> &mut Self {
        self.roads.push((a, b, length));
        self
    }

    /// Computes all-pairs shortest paths (Floyd-Warshall).
    ///
    /// # Errors
    ///
    /// Fails on roads referencing unknown cities, negative or non-finite
    /// lengths, and disconnected graphs.
    pub fn build(self) -> Result<GraphTopology> {
        let n = self.names.len();
        let mut dist = vec![f64::INFINITY; n * n];
        let mut next_hop = vec![usize::MAX; n * n];
        let mut adjacency = vec![Vec::new(); n];

        for i in 0..n {
            dist[i * n + i] = 0.0;
            next_hop[i * n + i] = i;
        }

        for &(a, b, length) in &self.roads {
            if a.index() >= n || b.index() >= n {
                return Err(RoutingError::Topology(format!(
                    "road {a} - {b} references an unknown city"
                )));
            }
            if !length.is_finite() || length < 0.0 {
                return Err(RoutingError::Topology(format!(
                    "road {a} - {b} has invalid length {length}"
                )));
            }
            if a == b {
                continue;
            }
            if !adjacency[a.index()].contains(&b) {
                adjacency[a.index()].push(b);
                adjacency[b.index()].push(a);
            }
            for (from, to) in [(a, b), (b, a)] {
                let slot = from.index() * n + to.index();
                if length < dist[slot] {
                    dist[slot] = length;
                    next_hop[slot] = to.index();
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let ik = dist[i * n + k];
                if ik == f64::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let through = ik + dist[k * n + j];
                    if through < dist[i * n + j] {
                        dist[i * n + j] = through;
                        next_hop[i * n + j] = next_hop[i * n + k];
                    }
                }
            }
        }

        if let Some(slot) = dist.iter().position(|d| *d == f64::INFINITY) {
            return Err(RoutingError::Topology(format!(
                "{} is unreachable from {}",
                self.names[slot % n],
                self.names[slot / n]
            )));
        }

        for neighbors in &mut adjacency {
            neighbors.sort();
        }

        Ok(GraphTopology {
            names: self.names,
            adjacency,
            dist,
            next_hop,
        })
    }
}
