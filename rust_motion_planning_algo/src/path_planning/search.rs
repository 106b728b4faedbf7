//! Pieces shared by the four graph searches

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::{GridGraph, GridPoint};

/// Result of a graph search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Lattice points from start to goal, empty when no path exists
    pub path: Vec<GridPoint>,
    /// Summed edge cost of `path`, `None` when no path exists
    pub cost: Option<f64>,
    /// Number of frontier entries popped
    pub expanded: usize,
}

impl SearchResult {
    pub fn not_found(expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: None,
            expanded,
        }
    }

    /// Whether a path was found
    pub fn is_found(&self) -> bool {
        self.cost.is_some()
    }
}

/// Common interface of the graph planners
pub trait GraphPlanner {
    /// Search for a path from `start` to `goal`
    fn plan(&self, start: GridPoint, goal: GridPoint) -> SearchResult;
}

/// Available graph search strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphSearchKind {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl GraphSearchKind {
    pub const ALL: [GraphSearchKind; 4] = [
        GraphSearchKind::Bfs,
        GraphSearchKind::Dfs,
        GraphSearchKind::Dijkstra,
        GraphSearchKind::AStar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GraphSearchKind::Bfs => "BFS",
            GraphSearchKind::Dfs => "DFS",
            GraphSearchKind::Dijkstra => "Dijkstra",
            GraphSearchKind::AStar => "A*",
        }
    }

    /// Run this strategy over `graph`
    pub fn plan(&self, graph: &GridGraph, start: GridPoint, goal: GridPoint) -> SearchResult {
        match self {
            GraphSearchKind::Bfs => super::bfs::BfsPlanner::new(graph).plan(start, goal),
            GraphSearchKind::Dfs => super::dfs::DfsPlanner::new(graph).plan(start, goal),
            GraphSearchKind::Dijkstra => {
                super::dijkstra::DijkstraPlanner::new(graph).plan(start, goal)
            }
            GraphSearchKind::AStar => super::astar::AStarPlanner::new(graph).plan(start, goal),
        }
    }
}

impl fmt::Display for GraphSearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry of a priority frontier.
///
/// Ordered so that `BinaryHeap` pops the lowest `priority` first and, among
/// equal priorities, the entry pushed first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry {
    pub priority: f64,
    pub cost: f64,
    pub seq: u64,
    pub point: GridPoint,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Walk the predecessor map back from `goal`.
///
/// Returns an empty path unless the walk ends exactly at `start`.
pub(crate) fn reconstruct_path(
    came_from: &HashMap<GridPoint, GridPoint>,
    start: GridPoint,
    goal: GridPoint,
) -> Vec<GridPoint> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&parent) = came_from.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();

    if path.first() == Some(&start) {
        path
    } else {
        Vec::new()
    }
}

/// Sum of edge costs along `path`; `None` if a step is not an edge
pub(crate) fn path_cost(graph: &GridGraph, path: &[GridPoint]) -> Option<f64> {
    path.windows(2)
        .try_fold(0.0, |total, pair| Some(total + graph.edge_cost(&pair[0], &pair[1])?))
}

/// Package a reconstructed path and its cost
pub(crate) fn finish(path: Vec<GridPoint>, cost: Option<f64>, expanded: usize) -> SearchResult {
    match cost {
        Some(cost) if !path.is_empty() => SearchResult {
            path,
            cost: Some(cost),
            expanded,
        },
        _ => SearchResult::not_found(expanded),
    }
}
