//! Bounded 2D workspace with circular obstacles
//!
//! Shared by the grid graph builder and the tree planners. All queries are
//! read-only, so a single workspace can back any number of planning calls.

use nalgebra::Point2;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PlanningError;

/// A continuous point in the workspace
pub type Point = Point2<f64>;

/// A circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleObstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl CircleObstacle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// Whether `(px, py)` lies inside or on the boundary of the circle
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let dx = px - self.x;
        let dy = py - self.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Rectangular domain `[0, width] x [0, height]` populated with obstacles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workspace {
    width: f64,
    height: f64,
    obstacles: Vec<CircleObstacle>,
}

impl Workspace {
    /// Create a workspace from explicit obstacles
    pub fn new(
        width: f64,
        height: f64,
        obstacles: Vec<CircleObstacle>,
    ) -> Result<Self, PlanningError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PlanningError::InvalidBounds { width, height });
        }
        if let Some(bad) = obstacles
            .iter()
            .find(|obs| !(obs.radius.is_finite() && obs.radius >= 0.0))
        {
            return Err(PlanningError::InvalidObstacleRadius(bad.radius));
        }
        Ok(Self {
            width,
            height,
            obstacles,
        })
    }

    /// Create a workspace without obstacles
    pub fn empty(width: f64, height: f64) -> Result<Self, PlanningError> {
        Self::new(width, height, Vec::new())
    }

    /// Generate `n_obstacles` circles with centers uniform over the bounds and
    /// radii uniform over `radius_range` (inclusive).
    ///
    /// Start and goal placement is left to the caller; nothing here keeps the
    /// obstacles away from them.
    pub fn random<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        n_obstacles: usize,
        radius_range: (f64, f64),
        rng: &mut R,
    ) -> Result<Self, PlanningError> {
        let (min_r, max_r) = radius_range;
        if !(min_r.is_finite() && max_r.is_finite() && min_r >= 0.0 && min_r <= max_r) {
            return Err(PlanningError::InvalidRadiusRange {
                min: min_r,
                max: max_r,
            });
        }
        // Validate bounds before building the distributions, which panic on empty ranges.
        let mut workspace = Self::empty(width, height)?;

        let x_dist = Uniform::new(0.0, width);
        let y_dist = Uniform::new(0.0, height);
        let r_dist = Uniform::new_inclusive(min_r, max_r);

        workspace.obstacles = (0..n_obstacles)
            .map(|_| {
                let x = x_dist.sample(rng);
                let y = y_dist.sample(rng);
                let radius = r_dist.sample(rng);
                CircleObstacle::new(x, y, radius)
            })
            .collect();

        Ok(workspace)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn obstacles(&self) -> &[CircleObstacle] {
        &self.obstacles
    }

    /// Inclusive bounds test
    pub fn contains(&self, point: &Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Check if a point is inside (or on the boundary of) any obstacle
    pub fn is_inside_any_obstacle(&self, point: &Point) -> bool {
        self.obstacles
            .iter()
            .any(|obs| obs.contains(point.x, point.y))
    }

    /// Check the straight segment `p1 -> p2` against the obstacles.
    ///
    /// The segment is split into `max(ceil(len / step_size), 1)` equal
    /// intervals and every sample, endpoints included, is tested. Obstacles
    /// thinner than `step_size` can slip between two samples.
    pub fn is_segment_collision_free(&self, p1: &Point, p2: &Point, step_size: f64) -> bool {
        let delta = p2 - p1;
        let dist = delta.norm();
        let steps = ((dist / step_size).ceil() as usize).max(1);

        (0..=steps).all(|i| {
            let t = i as f64 / steps as f64;
            !self.is_inside_any_obstacle(&(p1 + delta * t))
        })
    }
}
