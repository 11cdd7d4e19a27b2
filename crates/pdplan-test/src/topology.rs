//! Topology fixtures.
//!
//! # Example
//!
//! ```
//! use pdplan_core::Topology;
//! use pdplan_test::topology::line_topology;
//!
//! let (topology, cities) = line_topology(4);
//! assert_eq!(topology.distance(cities[0], cities[3]), 3.0);
//! ```

use pdplan_core::{CityId, GraphTopology};

/// Cities 0..n on a line, one distance unit apart.
pub fn line_topology(n: usize) -> (GraphTopology, Vec<CityId>) {
    let mut builder = GraphTopology::builder();
    let cities: Vec<CityId> = (0..n).map(|i| builder.add_city(format!("L{i}"))).collect();
    for pair in cities.windows(2) {
        builder.add_road(pair[0], pair[1], 1.0);
    }
    (builder.build().expect("line topology is connected"), cities)
}

/// A `width` x `height` grid with unit roads; city `(x, y)` is at index
/// `y * width + x`.
pub fn grid_topology(width: usize, height: usize) -> (GraphTopology, Vec<CityId>) {
    let mut builder = GraphTopology::builder();
    let cities: Vec<CityId> = (0..width * height)
        .map(|i| builder.add_city(format!("G{}_{}", i % width, i / width)))
        .collect();
    for y in 0..height {
        for x in 0..width {
            let here = cities[y * width + x];
            if x + 1 < width {
                builder.add_road(here, cities[y * width + x + 1], 1.0);
            }
            if y + 1 < height {
                builder.add_road(here, cities[(y + 1) * width + x], 1.0);
            }
        }
    }
    (builder.build().expect("grid topology is connected"), cities)
}

/// Complete graph over points in the plane with euclidean road lengths.
pub fn euclidean_topology(points: &[(f64, f64)]) -> (GraphTopology, Vec<CityId>) {
    let mut builder = GraphTopology::builder();
    let cities: Vec<CityId> = (0..points.len())
        .map(|i| builder.add_city(format!("E{i}")))
        .collect();
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
            builder.add_road(cities[i], cities[j], (dx * dx + dy * dy).sqrt());
        }
    }
    (builder.build().expect("euclidean topology is complete"), cities)
}
