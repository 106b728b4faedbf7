//! RRT* path planning algorithm
//!
//! RRT with two extra steps per accepted sample: the new node picks the
//! cheapest collision-free parent among its neighbors, then offers itself as
//! a cheaper parent to those neighbors. Rewiring only updates the rewired
//! node's cost; its descendants keep the costs they had.

use nalgebra::distance;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::rrt::{steer, RrtConfig, Sampler, TreeResult};
use super::tree::Tree;
use super::workspace::{Point, Workspace};
use crate::error::PlanningError;

/// Configuration for RRT* planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RrtStarConfig {
    #[serde(flatten)]
    pub base: RrtConfig,
    /// Radius of the near set used for parent choice and rewiring
    pub neighbor_radius: f64,
}

impl Default for RrtStarConfig {
    fn default() -> Self {
        Self {
            base: RrtConfig::default(),
            neighbor_radius: 15.0,
        }
    }
}

impl RrtStarConfig {
    pub fn validate(&self) -> Result<(), PlanningError> {
        self.base.validate()?;
        if !(self.neighbor_radius.is_finite() && self.neighbor_radius >= 0.0) {
            return Err(PlanningError::InvalidNeighborRadius(self.neighbor_radius));
        }
        Ok(())
    }
}

/// RRT* path planner
pub struct RrtStarPlanner<'a> {
    workspace: &'a Workspace,
    config: RrtStarConfig,
}

impl<'a> RrtStarPlanner<'a> {
    /// Create a new RRT* planner, rejecting invalid configuration
    pub fn new(workspace: &'a Workspace, config: RrtStarConfig) -> Result<Self, PlanningError> {
        config.validate()?;
        Ok(Self { workspace, config })
    }

    pub fn config(&self) -> &RrtStarConfig {
        &self.config
    }

    /// Plan a path from start to goal, seeding from the configuration
    pub fn plan(&self, start: Point, goal: Point) -> TreeResult {
        let mut rng = self.config.base.rng();
        self.plan_with_rng(start, goal, &mut rng)
    }

    /// Plan a path from start to goal drawing samples from `rng`
    pub fn plan_with_rng<R: Rng + ?Sized>(
        &self,
        start: Point,
        goal: Point,
        rng: &mut R,
    ) -> TreeResult {
        let step_size = self.config.base.step_size;
        let sampler = Sampler::new(self.workspace, self.config.base.goal_sample_rate);

        let mut tree = Tree::new(start);
        let mut iterations = 0usize;
        let mut rewires = 0usize;
        let mut goal_idx = None;

        for _ in 0..self.config.base.max_iterations {
            iterations += 1;

            let sample = sampler.sample(&goal, rng);
            let nearest_idx = tree.nearest(&sample);
            let nearest = tree.node(nearest_idx).point;
            let new_point = steer(&nearest, &sample, step_size);

            if !self.workspace.contains(&new_point)
                || !self.collision_free(&nearest, &new_point)
            {
                continue;
            }

            let near = tree.near(&new_point, self.config.neighbor_radius);
            let collision_free = |from: &Point, to: &Point| self.collision_free(from, to);

            let (best_parent, best_cost) =
                tree.choose_parent(&new_point, nearest_idx, &near, collision_free);
            let new_idx = tree.insert(new_point, best_parent, best_cost);
            rewires += tree.rewire(new_idx, &near, collision_free);

            let dist_to_goal = distance(&new_point, &goal);
            if dist_to_goal <= step_size {
                trace!(iterations, cost = best_cost + dist_to_goal, "RRT* reached goal");
                goal_idx = Some(tree.insert(goal, new_idx, best_cost + dist_to_goal));
                break;
            }
        }

        let result = TreeResult::finish(tree, goal_idx, iterations);
        debug!(
            iterations,
            rewires,
            tree_size = result.tree.len(),
            success = result.success,
            "RRT* finished"
        );
        result
    }

    fn collision_free(&self, from: &Point, to: &Point) -> bool {
        self.workspace
            .is_segment_collision_free(from, to, self.config.base.step_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_planning::rrt::RrtPlanner;
    use crate::path_planning::workspace::CircleObstacle;
    use crate::util::path_length;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(seed: u64, max_iterations: usize, neighbor_radius: f64) -> RrtStarConfig {
        RrtStarConfig {
            base: RrtConfig {
                step_size: 1.0,
                goal_sample_rate: 0.05,
                max_iterations,
                seed: Some(seed),
            },
            neighbor_radius,
        }
    }

    fn two_pillars() -> Workspace {
        Workspace::new(
            40.0,
            40.0,
            vec![
                CircleObstacle::new(20.0, 10.0, 8.0),
                CircleObstacle::new(20.0, 30.0, 8.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_finds_collision_free_path() {
        let ws = two_pillars();
        let planner = RrtStarPlanner::new(&ws, config(11, 50_000, 5.0)).unwrap();
        let result = planner.plan(Point::new(4.0, 20.0), Point::new(36.0, 20.0));
        assert!(result.success);
        assert_eq!(result.path.first(), Some(&Point::new(4.0, 20.0)));
        assert_eq!(result.path.last(), Some(&Point::new(36.0, 20.0)));
        assert!(result.path.iter().all(|p| !ws.is_inside_any_obstacle(p)));
    }

    #[test]
    fn test_parent_costs_are_consistent_on_insert() {
        let ws = two_pillars();
        let planner = RrtStarPlanner::new(&ws, config(5, 3000, 4.0)).unwrap();
        let result = planner.plan(Point::new(4.0, 20.0), Point::new(36.0, 20.0));
        // A node's recorded cost never undercuts the path through its parent
        for node in &result.tree {
            if let Some(parent) = node.parent {
                let parent = &result.tree[parent];
                let through_parent = parent.cost + distance(&parent.point, &node.point);
                assert!(node.cost + 1e-9 >= through_parent);
            }
        }
    }

    #[test]
    fn test_zero_radius_matches_rrt() {
        // With an empty near set RRT* makes exactly the same moves as RRT
        let ws = two_pillars();
        let star = RrtStarPlanner::new(&ws, config(9, 4000, 0.0)).unwrap();
        let plain = RrtPlanner::new(&ws, config(9, 4000, 0.0).base).unwrap();
        let a = star.plan(Point::new(4.0, 20.0), Point::new(36.0, 20.0));
        let b = plain.plan(Point::new(4.0, 20.0), Point::new(36.0, 20.0));
        assert_eq!(a.path, b.path);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.tree.len(), b.tree.len());
    }

    #[test]
    fn test_more_iterations_never_worse() {
        let ws = two_pillars();
        let start = Point::new(4.0, 20.0);
        let goal = Point::new(36.0, 20.0);
        let mut best: Option<f64> = None;
        for budget in [500, 2000, 8000, 16_000] {
            let planner = RrtStarPlanner::new(&ws, config(21, budget, 5.0)).unwrap();
            let result = planner.plan(start, goal);
            if result.success {
                let cost = path_length(&result.path);
                if let Some(prev) = best {
                    assert!(cost <= prev + 1e-9);
                }
                best = Some(cost);
            } else {
                assert!(best.is_none(), "lost a path with a larger budget");
            }
        }
    }

    #[test]
    fn test_rewiring_logs_extra_edges() {
        let ws = Workspace::empty(30.0, 30.0).unwrap();
        let planner = RrtStarPlanner::new(&ws, config(2, 20_000, 6.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let result = planner.plan_with_rng(Point::new(1.0, 1.0), Point::new(29.0, 29.0), &mut rng);
        assert!(result.success);
        // One edge per inserted node plus one per rewire, and a dense tree
        // always rewires something
        assert!(result.edges.len() > result.tree.len() - 1);
        // Only rewiring can give a node a parent inserted after it
        let rewired = result
            .tree
            .iter()
            .enumerate()
            .filter(|(i, node)| node.parent.map_or(false, |p| p > *i))
            .count();
        assert!(rewired > 0);
    }

    #[test]
    fn test_invalid_radius() {
        let ws = Workspace::empty(10.0, 10.0).unwrap();
        let bad = RrtStarConfig {
            neighbor_radius: -1.0,
            ..Default::default()
        };
        assert_eq!(
            RrtStarPlanner::new(&ws, bad).err(),
            Some(PlanningError::InvalidNeighborRadius(-1.0))
        );
    }
}
