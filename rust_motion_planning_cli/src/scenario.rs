//! Scenario files: workspace, endpoints and planner settings in YAML

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_motion_planning_algo::prelude::*;
use serde::{Deserialize, Serialize};

/// Random obstacle field parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomObstacles {
    pub count: usize,
    pub radius_min: f64,
    pub radius_max: f64,
    pub seed: u64,
}

impl Default for RandomObstacles {
    fn default() -> Self {
        Self {
            count: 10,
            radius_min: 5.0,
            radius_max: 15.0,
            seed: 42,
        }
    }
}

/// Everything needed to run one planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub width: f64,
    pub height: f64,
    pub start: [f64; 2],
    pub goal: [f64; 2],
    /// Explicit obstacles, used when `random` is absent
    pub obstacles: Vec<CircleObstacle>,
    /// Generate the obstacle field instead of listing it
    pub random: Option<RandomObstacles>,
    pub grid: GridConfig,
    pub heuristic: Heuristic,
    pub rrt: RrtConfig,
    pub rrt_star: RrtStarConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            start: [10.0, 10.0],
            goal: [90.0, 90.0],
            obstacles: Vec::new(),
            random: Some(RandomObstacles::default()),
            grid: GridConfig::default(),
            heuristic: Heuristic::default(),
            rrt: RrtConfig::default(),
            rrt_star: RrtStarConfig::default(),
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Build the workspace, generating obstacles when requested
    pub fn workspace(&self) -> Result<Workspace> {
        let workspace = match &self.random {
            Some(random) => {
                let mut rng = StdRng::seed_from_u64(random.seed);
                Workspace::random(
                    self.width,
                    self.height,
                    random.count,
                    (random.radius_min, random.radius_max),
                    &mut rng,
                )
            }
            None => Workspace::new(self.width, self.height, self.obstacles.clone()),
        };
        workspace.context("invalid workspace")
    }

    pub fn start_point(&self) -> Point {
        Point::new(self.start[0], self.start[1])
    }

    pub fn goal_point(&self) -> Point {
        Point::new(self.goal[0], self.goal[1])
    }
}

/// Round to integer coordinates.
///
/// With a resolution above 1 the rounded point can fall between lattice
/// points, in which case every graph search reports no path.
pub fn to_grid_point(point: &Point) -> GridPoint {
    GridPoint::new(point.x.round() as i64, point.y.round() as i64)
}
