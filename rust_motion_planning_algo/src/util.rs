//! Helpers for consumers of planner output

use crate::path_planning::{GridPoint, Point};

/// Total length of a polyline; zero for fewer than two points
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2)
        .fold(0.0, |total, pair| total + nalgebra::distance(&pair[0], &pair[1]))
}

/// Continuous points of a lattice path
pub fn grid_path_to_points(path: &[GridPoint]) -> Vec<Point> {
    path.iter().map(|p| p.to_point()).collect()
}
