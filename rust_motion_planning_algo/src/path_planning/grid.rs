//! Grid graph representation for path planning
//!
//! Discretizes a [`Workspace`] into an integer lattice and keeps only the
//! collision-free lattice points, each with its list of weighted neighbors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::workspace::{Point, Workspace};
use crate::error::PlanningError;

/// A lattice point in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Continuous position of the lattice point
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    pub fn manhattan_distance(&self, other: &GridPoint) -> f64 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as f64
    }

    pub fn euclidean_distance(&self, other: &GridPoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }
}

impl From<(i64, i64)> for GridPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Neighborhood used when linking lattice points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Connectivity {
    /// Axis-aligned moves only
    #[default]
    Four,
    /// Axis-aligned and diagonal moves
    Eight,
}

const CARDINAL: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const ALL_DIRECTIONS: [(i64, i64); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1), // Cardinal
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1), // Diagonal
];

impl Connectivity {
    /// Neighbor offsets in the order edges are recorded
    pub fn offsets(&self) -> &'static [(i64, i64)] {
        match self {
            Connectivity::Four => &CARDINAL,
            Connectivity::Eight => &ALL_DIRECTIONS,
        }
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = PlanningError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(PlanningError::InvalidConnectivity(other)),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(value: Connectivity) -> Self {
        match value {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}

/// Parameters of the lattice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Spacing between lattice points, in world units
    pub resolution: u32,
    pub connectivity: Connectivity,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: 1,
            connectivity: Connectivity::Four,
        }
    }
}

/// A weighted, directed edge to a neighboring lattice point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: GridPoint,
    pub cost: f64,
}

/// Adjacency structure over the collision-free lattice points
#[derive(Debug, Clone, Default)]
pub struct GridGraph {
    adjacency: HashMap<GridPoint, Vec<Edge>>,
}

impl GridGraph {
    /// Build the lattice graph of `workspace`.
    ///
    /// Lattice points run over `0, r, 2r, ...` strictly below the width and
    /// height. Points inside an obstacle are dropped along with every edge
    /// that would reach them.
    pub fn build(workspace: &Workspace, config: &GridConfig) -> Result<Self, PlanningError> {
        if config.resolution == 0 {
            return Err(PlanningError::InvalidResolution);
        }
        let step = i64::from(config.resolution);
        let offsets = config.connectivity.offsets();

        let in_bounds = |p: &GridPoint| {
            p.x >= 0
                && p.y >= 0
                && (p.x as f64) < workspace.width()
                && (p.y as f64) < workspace.height()
        };
        let is_free = |p: &GridPoint| !workspace.is_inside_any_obstacle(&p.to_point());

        let mut adjacency = HashMap::new();
        let mut edge_count = 0usize;

        let mut x = 0i64;
        while (x as f64) < workspace.width() {
            let mut y = 0i64;
            while (y as f64) < workspace.height() {
                let cell = GridPoint::new(x, y);
                if is_free(&cell) {
                    let neighbors: Vec<Edge> = offsets
                        .iter()
                        .map(|(dx, dy)| GridPoint::new(x + dx * step, y + dy * step))
                        .filter(|nbr| in_bounds(nbr) && is_free(nbr))
                        .map(|nbr| Edge {
                            to: nbr,
                            cost: cell.euclidean_distance(&nbr),
                        })
                        .collect();
                    edge_count += neighbors.len();
                    adjacency.insert(cell, neighbors);
                }
                y += step;
            }
            x += step;
        }

        debug!(
            nodes = adjacency.len(),
            edges = edge_count,
            resolution = config.resolution,
            connectivity = u8::from(config.connectivity),
            "built grid graph"
        );

        Ok(Self { adjacency })
    }

    /// Build a graph from explicit adjacency lists
    pub fn from_adjacency(adjacency: HashMap<GridPoint, Vec<Edge>>) -> Self {
        Self { adjacency }
    }

    /// Outgoing edges of `point`, empty when the point is not in the graph
    pub fn neighbors(&self, point: &GridPoint) -> &[Edge] {
        self.adjacency
            .get(point)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, point: &GridPoint) -> bool {
        self.adjacency.contains_key(point)
    }

    /// Cost of the direct edge `from -> to`, if any
    pub fn edge_cost(&self, from: &GridPoint, to: &GridPoint) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .find(|edge| edge.to == *to)
            .map(|edge| edge.cost)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GridPoint> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_planning::workspace::CircleObstacle;
    use approx::assert_relative_eq;

    fn build(workspace: &Workspace, resolution: u32, connectivity: Connectivity) -> GridGraph {
        GridGraph::build(
            workspace,
            &GridConfig {
                resolution,
                connectivity,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let ws = Workspace::empty(10.0, 10.0).unwrap();
        let graph = build(&ws, 1, Connectivity::Four);
        assert_eq!(graph.node_count(), 100);
        // Corners have 2 neighbors, other border cells 3, interior 4.
        assert_eq!(graph.edge_count(), 4 * 2 + 32 * 3 + 64 * 4);
        assert_eq!(graph.neighbors(&GridPoint::new(0, 0)).len(), 2);
        assert!(!graph.contains(&GridPoint::new(10, 0)));
    }

    #[test]
    fn test_diagonal_costs() {
        let ws = Workspace::empty(10.0, 10.0).unwrap();
        let graph = build(&ws, 1, Connectivity::Eight);
        let center = GridPoint::new(5, 5);
        assert_eq!(graph.neighbors(&center).len(), 8);
        assert_relative_eq!(graph.edge_cost(&center, &GridPoint::new(6, 5)).unwrap(), 1.0);
        assert_relative_eq!(
            graph.edge_cost(&center, &GridPoint::new(6, 6)).unwrap(),
            std::f64::consts::SQRT_2
        );
    }

    #[test]
    fn test_resolution_scales_lattice() {
        let ws = Workspace::empty(10.0, 10.0).unwrap();
        let graph = build(&ws, 2, Connectivity::Four);
        assert_eq!(graph.node_count(), 25);
        assert!(graph.contains(&GridPoint::new(8, 8)));
        assert!(!graph.contains(&GridPoint::new(1, 1)));
        assert_relative_eq!(
            graph
                .edge_cost(&GridPoint::new(2, 2), &GridPoint::new(4, 2))
                .unwrap(),
            2.0
        );
    }

    #[test]
    fn test_obstacles() {
        let ws = Workspace::new(10.0, 10.0, vec![CircleObstacle::new(5.0, 5.0, 1.0)]).unwrap();
        let graph = build(&ws, 1, Connectivity::Eight);
        for blocked in [(5, 5), (4, 5), (6, 5), (5, 4), (5, 6)] {
            assert!(!graph.contains(&GridPoint::from(blocked)));
        }
        for edges in graph.nodes().map(|p| graph.neighbors(p)) {
            for edge in edges {
                assert!(graph.contains(&edge.to));
            }
        }
    }

    #[test]
    fn test_edges_are_symmetric() {
        let ws = Workspace::new(
            20.0,
            15.0,
            vec![
                CircleObstacle::new(5.0, 5.0, 2.5),
                CircleObstacle::new(14.0, 9.0, 3.0),
            ],
        )
        .unwrap();
        for connectivity in [Connectivity::Four, Connectivity::Eight] {
            let graph = build(&ws, 1, connectivity);
            for p in graph.nodes() {
                for edge in graph.neighbors(p) {
                    assert_eq!(graph.edge_cost(&edge.to, p), Some(edge.cost));
                }
            }
        }
    }

    #[test]
    fn test_invalid_config() {
        let ws = Workspace::empty(10.0, 10.0).unwrap();
        let config = GridConfig {
            resolution: 0,
            ..Default::default()
        };
        assert_eq!(
            GridGraph::build(&ws, &config).unwrap_err(),
            PlanningError::InvalidResolution
        );
        assert_eq!(
            Connectivity::try_from(6),
            Err(PlanningError::InvalidConnectivity(6))
        );
        assert_eq!(Connectivity::try_from(8), Ok(Connectivity::Eight));
    }
}
