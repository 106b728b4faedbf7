//! Path planning algorithms
//!
//! This module provides path planning algorithms including:
//! - BFS and DFS (grid graph, unweighted)
//! - Dijkstra (grid graph, optimal without heuristic)
//! - A* (grid graph, optimal with an admissible heuristic)
//! - RRT (continuous space, probabilistically complete)
//! - RRT* (continuous space, parent selection and rewiring)

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod grid;
pub mod rrt;
pub mod rrt_star;
pub mod search;
pub mod tree;
pub mod workspace;

pub use astar::{AStarPlanner, Heuristic};
pub use bfs::BfsPlanner;
pub use dfs::DfsPlanner;
pub use dijkstra::DijkstraPlanner;
pub use grid::{Connectivity, Edge, GridConfig, GridGraph, GridPoint};
pub use rrt::{RrtConfig, RrtPlanner, TreeResult};
pub use rrt_star::{RrtStarConfig, RrtStarPlanner};
pub use search::{GraphPlanner, GraphSearchKind, SearchResult};
pub use tree::{RrtNode, Tree};
pub use workspace::{CircleObstacle, Point, Workspace};
