//! Breadth-first search
//!
//! Unweighted; the returned path has the fewest edges of any path.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use super::grid::{GridGraph, GridPoint};
use super::search::{finish, path_cost, reconstruct_path, GraphPlanner, SearchResult};

/// Breadth-first planner over a grid graph
pub struct BfsPlanner<'a> {
    graph: &'a GridGraph,
}

impl<'a> BfsPlanner<'a> {
    pub fn new(graph: &'a GridGraph) -> Self {
        Self { graph }
    }
}

impl GraphPlanner for BfsPlanner<'_> {
    fn plan(&self, start: GridPoint, goal: GridPoint) -> SearchResult {
        let mut queue = VecDeque::from([start]);
        let mut visited = HashSet::from([start]);
        let mut came_from: HashMap<GridPoint, GridPoint> = HashMap::new();
        let mut expanded = 0usize;

        while let Some(current) = queue.pop_front() {
            expanded += 1;
            if current == goal {
                break;
            }

            for edge in self.graph.neighbors(&current) {
                if visited.insert(edge.to) {
                    came_from.insert(edge.to, current);
                    queue.push_back(edge.to);
                }
            }
        }

        let path = reconstruct_path(&came_from, start, goal);
        let cost = path_cost(self.graph, &path);
        let result = finish(path, cost, expanded);
        debug!(
            expanded,
            found = result.is_found(),
            edges = result.path.len().saturating_sub(1),
            "BFS finished"
        );
        result
    }
}
