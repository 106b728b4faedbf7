//! Depth-first search
//!
//! Returns whichever path the stack discovers first; no length or cost
//! guarantee.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::grid::{GridGraph, GridPoint};
use super::search::{finish, path_cost, reconstruct_path, GraphPlanner, SearchResult};

/// Depth-first planner over a grid graph
pub struct DfsPlanner<'a> {
    graph: &'a GridGraph,
}

impl<'a> DfsPlanner<'a> {
    pub fn new(graph: &'a GridGraph) -> Self {
        Self { graph }
    }
}

impl GraphPlanner for DfsPlanner<'_> {
    fn plan(&self, start: GridPoint, goal: GridPoint) -> SearchResult {
        let mut stack = vec![start];
        let mut visited = HashSet::new();
        let mut came_from: HashMap<GridPoint, GridPoint> = HashMap::new();
        let mut expanded = 0usize;

        while let Some(current) = stack.pop() {
            expanded += 1;
            if current == goal {
                break;
            }
            if !visited.insert(current) {
                continue;
            }

            // A node's predecessor is whoever pushed it last; it freezes once
            // the node is visited.
            for edge in self.graph.neighbors(&current) {
                if !visited.contains(&edge.to) {
                    came_from.insert(edge.to, current);
                    stack.push(edge.to);
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
            "DFS finished"
        );
        result
    }
}
