//! Dijkstra's path planning algorithm
//!
//! Similar to A* but without heuristic - guarantees optimal path for
//! non-negative edge costs.

use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use super::grid::{GridGraph, GridPoint};
use super::search::{finish, reconstruct_path, FrontierEntry, GraphPlanner, SearchResult};

/// Dijkstra path planner
pub struct DijkstraPlanner<'a> {
    graph: &'a GridGraph,
}

impl<'a> DijkstraPlanner<'a> {
    /// Create a new Dijkstra planner for the given graph
    pub fn new(graph: &'a GridGraph) -> Self {
        Self { graph }
    }
}

impl GraphPlanner for DijkstraPlanner<'_> {
    fn plan(&self, start: GridPoint, goal: GridPoint) -> SearchResult {
        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<GridPoint, GridPoint> = HashMap::new();
        let mut cost_so_far: HashMap<GridPoint, f64> = HashMap::new();
        let mut seq = 0u64;
        let mut expanded = 0usize;

        cost_so_far.insert(start, 0.0);
        open_set.push(FrontierEntry {
            priority: 0.0,
            cost: 0.0,
            seq,
            point: start,
        });

        while let Some(current) = open_set.pop() {
            expanded += 1;

            if current.point == goal {
                break;
            }

            // Skip entries superseded by a cheaper push
            let best = cost_so_far
                .get(&current.point)
                .copied()
                .unwrap_or(f64::INFINITY);
            if current.cost > best {
                continue;
            }

            for edge in self.graph.neighbors(&current.point) {
                let new_cost = current.cost + edge.cost;
                let known = cost_so_far.get(&edge.to).copied().unwrap_or(f64::INFINITY);

                if new_cost < known {
                    cost_so_far.insert(edge.to, new_cost);
                    came_from.insert(edge.to, current.point);
                    seq += 1;
                    open_set.push(FrontierEntry {
                        priority: new_cost,
                        cost: new_cost,
                        seq,
                        point: edge.to,
                    });
                }
            }
        }

        let path = reconstruct_path(&came_from, start, goal);
        let cost = cost_so_far.get(&goal).copied();
        let result = finish(path, cost, expanded);
        debug!(
            expanded,
            cost = result.cost.unwrap_or(f64::INFINITY),
            "Dijkstra finished"
        );
        result
    }
}
