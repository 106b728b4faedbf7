//! A* path planning algorithm
//!
//! The default Manhattan heuristic is admissible on 4-connected grids only.
//! On 8-connected grids it can overestimate diagonal travel, so the returned
//! path may cost more than the optimum; use [`Heuristic::Euclidean`] there.

use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::{GridGraph, GridPoint};
use super::search::{finish, reconstruct_path, FrontierEntry, GraphPlanner, SearchResult};

/// Distance estimate from a lattice point to the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub fn estimate(&self, from: &GridPoint, goal: &GridPoint) -> f64 {
        match self {
            Heuristic::Manhattan => from.manhattan_distance(goal),
            Heuristic::Euclidean => from.euclidean_distance(goal),
        }
    }
}

/// A* path planner
pub struct AStarPlanner<'a> {
    graph: &'a GridGraph,
    heuristic: Heuristic,
}

impl<'a> AStarPlanner<'a> {
    /// Create a new A* planner using the Manhattan heuristic
    pub fn new(graph: &'a GridGraph) -> Self {
        Self::with_heuristic(graph, Heuristic::default())
    }

    pub fn with_heuristic(graph: &'a GridGraph, heuristic: Heuristic) -> Self {
        Self { graph, heuristic }
    }
}

impl GraphPlanner for AStarPlanner<'_> {
    fn plan(&self, start: GridPoint, goal: GridPoint) -> SearchResult {
        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<GridPoint, GridPoint> = HashMap::new();
        let mut g_scores: HashMap<GridPoint, f64> = HashMap::new();
        let mut seq = 0u64;
        let mut expanded = 0usize;

        g_scores.insert(start, 0.0);
        open_set.push(FrontierEntry {
            priority: self.heuristic.estimate(&start, &goal),
            cost: 0.0,
            seq,
            point: start,
        });

        while let Some(current) = open_set.pop() {
            expanded += 1;

            if current.point == goal {
                break;
            }

            let best = g_scores.get(&current.point).copied().unwrap_or(f64::INFINITY);
            if current.cost > best {
                continue;
            }

            for edge in self.graph.neighbors(&current.point) {
                let tentative_g = current.cost + edge.cost;
                let current_g = g_scores.get(&edge.to).copied().unwrap_or(f64::INFINITY);

                if tentative_g < current_g {
                    g_scores.insert(edge.to, tentative_g);
                    came_from.insert(edge.to, current.point);
                    seq += 1;
                    open_set.push(FrontierEntry {
                        priority: tentative_g + self.heuristic.estimate(&edge.to, &goal),
                        cost: tentative_g,
                        seq,
                        point: edge.to,
                    });
                }
            }
        }

        let path = reconstruct_path(&came_from, start, goal);
        let cost = g_scores.get(&goal).copied();
        let result = finish(path, cost, expanded);
        debug!(
            expanded,
            heuristic = ?self.heuristic,
            cost = result.cost.unwrap_or(f64::INFINITY),
            "A* finished"
        );
        result
    }
}
