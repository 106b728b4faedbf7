//! RRT (Rapidly-exploring Random Tree) path planning algorithm
//!
//! Works in continuous space with circular obstacles.

use nalgebra::distance;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tree::{RrtNode, Tree};
use super::workspace::{Point, Workspace};
use crate::error::PlanningError;

/// Result of a tree planner
#[derive(Debug, Clone)]
pub struct TreeResult {
    /// Path from start to goal, empty when the goal was never connected
    pub path: Vec<Point>,
    /// All nodes in the tree (for visualization)
    pub tree: Vec<RrtNode>,
    /// Every edge ever added, rewired ones included, in insertion order
    pub edges: Vec<(Point, Point)>,
    /// Whether a path was found
    pub success: bool,
    /// Number of iterations (main loop iterations)
    pub iterations: usize,
}

impl TreeResult {
    pub(crate) fn finish(tree: Tree, goal_idx: Option<usize>, iterations: usize) -> Self {
        let path = goal_idx.map(|idx| tree.path_to(idx)).unwrap_or_default();
        let (nodes, edges) = tree.into_parts();
        Self {
            success: goal_idx.is_some(),
            path,
            tree: nodes,
            edges,
            iterations,
        }
    }
}

/// Configuration for RRT planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RrtConfig {
    /// Extension distance per iteration; also the collision sampling step and
    /// the goal connection radius
    pub step_size: f64,
    /// Probability of sampling the goal (0.0 to 1.0)
    pub goal_sample_rate: f64,
    /// Maximum iterations
    pub max_iterations: usize,
    /// Random seed (None for random)
    pub seed: Option<u64>,
}

impl Default for RrtConfig {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            goal_sample_rate: 0.05,
            max_iterations: 100_000,
            seed: None,
        }
    }
}

impl RrtConfig {
    pub fn validate(&self) -> Result<(), PlanningError> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(PlanningError::InvalidStepSize(self.step_size));
        }
        if self.max_iterations == 0 {
            return Err(PlanningError::InvalidMaxIterations);
        }
        if !(0.0..=1.0).contains(&self.goal_sample_rate) {
            return Err(PlanningError::InvalidGoalSampleRate(self.goal_sample_rate));
        }
        Ok(())
    }

    /// Random stream for one planning call
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Sampling shared by RRT and RRT*
pub(crate) struct Sampler {
    x_dist: Uniform<f64>,
    y_dist: Uniform<f64>,
    goal_dist: Uniform<f64>,
    goal_sample_rate: f64,
}

impl Sampler {
    pub fn new(workspace: &Workspace, goal_sample_rate: f64) -> Self {
        Self {
            x_dist: Uniform::new_inclusive(0.0, workspace.width()),
            y_dist: Uniform::new_inclusive(0.0, workspace.height()),
            goal_dist: Uniform::new(0.0, 1.0),
            goal_sample_rate,
        }
    }

    /// The goal itself with probability `goal_sample_rate`, otherwise a
    /// uniform point in the bounds
    pub fn sample<R: Rng + ?Sized>(&self, goal: &Point, rng: &mut R) -> Point {
        if self.goal_dist.sample(rng) < self.goal_sample_rate {
            *goal
        } else {
            Point::new(self.x_dist.sample(rng), self.y_dist.sample(rng))
        }
    }
}

/// Move exactly `step_size` from `from` toward `to`.
///
/// The step is not clamped, so the result may pass beyond `to`.
pub(crate) fn steer(from: &Point, to: &Point, step_size: f64) -> Point {
    let theta = (to.y - from.y).atan2(to.x - from.x);
    Point::new(
        from.x + step_size * theta.cos(),
        from.y + step_size * theta.sin(),
    )
}

/// RRT path planner
pub struct RrtPlanner<'a> {
    workspace: &'a Workspace,
    config: RrtConfig,
}

impl<'a> RrtPlanner<'a> {
    /// Create a new RRT planner, rejecting invalid configuration
    pub fn new(workspace: &'a Workspace, config: RrtConfig) -> Result<Self, PlanningError> {
        config.validate()?;
        Ok(Self { workspace, config })
    }

    pub fn config(&self) -> &RrtConfig {
        &self.config
    }

    /// Plan a path from start to goal, seeding from the configuration
    pub fn plan(&self, start: Point, goal: Point) -> TreeResult {
        let mut rng = self.config.rng();
        self.plan_with_rng(start, goal, &mut rng)
    }

    /// Plan a path from start to goal drawing samples from `rng`
    pub fn plan_with_rng<R: Rng + ?Sized>(
        &self,
        start: Point,
        goal: Point,
        rng: &mut R,
    ) -> TreeResult {
        let step_size = self.config.step_size;
        let sampler = Sampler::new(self.workspace, self.config.goal_sample_rate);

        // Initialize tree with start node
        let mut tree = Tree::new(start);
        let mut iterations = 0usize;
        let mut goal_idx = None;

        for _ in 0..self.config.max_iterations {
            iterations += 1;

            let sample = sampler.sample(&goal, rng);

            // Find nearest node in tree
            let nearest_idx = tree.nearest(&sample);
            let nearest = tree.node(nearest_idx);

            // Steer toward sample
            let new_point = steer(&nearest.point, &sample, step_size);

            if !self.workspace.contains(&new_point)
                || !self
                    .workspace
                    .is_segment_collision_free(&nearest.point, &new_point, step_size)
            {
                continue;
            }

            let new_cost = nearest.cost + distance(&nearest.point, &new_point);
            let new_idx = tree.insert(new_point, nearest_idx, new_cost);

            // Check if goal reached
            let dist_to_goal = distance(&new_point, &goal);
            if dist_to_goal <= step_size {
                goal_idx = Some(tree.insert(goal, new_idx, new_cost + dist_to_goal));
                break;
            }
        }

        let result = TreeResult::finish(tree, goal_idx, iterations);
        debug!(
            iterations,
            tree_size = result.tree.len(),
            success = result.success,
            "RRT finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_planning::workspace::CircleObstacle;
    use crate::util::path_length;

    fn seeded(seed: u64, max_iterations: usize) -> RrtConfig {
        RrtConfig {
            seed: Some(seed),
            max_iterations,
            goal_sample_rate: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_simple_path() {
        let ws = Workspace::empty(20.0, 20.0).unwrap();
        let planner = RrtPlanner::new(&ws, seeded(42, 5000)).unwrap();
        let result = planner.plan(Point::new(5.0, 5.0), Point::new(15.0, 15.0));
        assert!(result.success);
        assert_eq!(result.path.first(), Some(&Point::new(5.0, 5.0)));
        assert_eq!(result.path.last(), Some(&Point::new(15.0, 15.0)));
    }

    #[test]
    fn test_path_with_obstacles() {
        let ws = Workspace::new(20.0, 20.0, vec![CircleObstacle::new(10.0, 10.0, 3.0)]).unwrap();
        let planner = RrtPlanner::new(&ws, seeded(42, 20_000)).unwrap();
        let result = planner.plan(Point::new(5.0, 10.0), Point::new(15.0, 10.0));
        assert!(result.success);
        // Path should go around the obstacle
        assert!(result.path.iter().all(|p| !ws.is_inside_any_obstacle(p)));
        assert!(path_length(&result.path) > 10.0);
    }

    #[test]
    fn test_goal_bias_reaches_goal_directly() {
        let ws = Workspace::empty(30.0, 30.0).unwrap();
        let config = RrtConfig {
            goal_sample_rate: 1.0,
            step_size: 1.0,
            max_iterations: 100,
            seed: Some(0),
        };
        let planner = RrtPlanner::new(&ws, config).unwrap();
        let start = Point::new(2.0, 3.0);
        let goal = Point::new(20.0, 17.0);
        let result = planner.plan(start, goal);
        let bound = (distance(&start, &goal) / 1.0).ceil() as usize;
        assert!(result.success);
        assert!(result.iterations <= bound);
        // Straight line: one node per step plus the goal
        assert_eq!(result.tree.len(), result.iterations + 2);
    }

    #[test]
    fn test_steer_overshoots() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(0.25, 0.0);
        let p = steer(&from, &to, 1.0);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
    }

    #[test]
    fn test_exhausted_budget() {
        // Goal sits inside an obstacle, so the tree can never get within reach
        let ws = Workspace::new(20.0, 20.0, vec![CircleObstacle::new(15.0, 15.0, 4.0)]).unwrap();
        let planner = RrtPlanner::new(&ws, seeded(3, 300)).unwrap();
        let result = planner.plan(Point::new(2.0, 2.0), Point::new(15.0, 15.0));
        assert!(!result.success);
        assert!(result.path.is_empty());
        assert_eq!(result.iterations, 300);
        assert!(result.tree.len() > 1);
        assert_eq!(result.edges.len(), result.tree.len() - 1);
    }

    #[test]
    fn test_same_seed_same_tree() {
        let ws = Workspace::new(20.0, 20.0, vec![CircleObstacle::new(10.0, 10.0, 3.0)]).unwrap();
        let planner = RrtPlanner::new(&ws, seeded(7, 2000)).unwrap();
        let a = planner.plan(Point::new(2.0, 2.0), Point::new(18.0, 18.0));
        let b = planner.plan(Point::new(2.0, 2.0), Point::new(18.0, 18.0));
        assert_eq!(a.path, b.path);
        assert_eq!(a.tree, b.tree);
    }

    #[test]
    fn test_invalid_config() {
        let ws = Workspace::empty(10.0, 10.0).unwrap();
        let bad_step = RrtConfig {
            step_size: 0.0,
            ..Default::default()
        };
        assert_eq!(
            RrtPlanner::new(&ws, bad_step).err(),
            Some(PlanningError::InvalidStepSize(0.0))
        );
        let bad_rate = RrtConfig {
            goal_sample_rate: 1.5,
            ..Default::default()
        };
        assert_eq!(
            RrtPlanner::new(&ws, bad_rate).err(),
            Some(PlanningError::InvalidGoalSampleRate(1.5))
        );
        let bad_iter = RrtConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert_eq!(
            RrtPlanner::new(&ws, bad_iter).err(),
            Some(PlanningError::InvalidMaxIterations)
        );
    }
}
