//! Motion planning in bounded 2D workspaces with circular obstacles.
//!
//! Grid planners (BFS, DFS, Dijkstra, A*) run over a [`GridGraph`] built from
//! a [`Workspace`]; tree planners (RRT, RRT*) sample the workspace directly.

pub mod error;
pub mod path_planning;
pub mod util;
pub mod prelude {
    pub use crate::error::PlanningError;
    pub use crate::util::*;
    pub use crate::*;
    pub use path_planning::{
        AStarPlanner, BfsPlanner, CircleObstacle, Connectivity, DfsPlanner, DijkstraPlanner,
        GraphPlanner, GraphSearchKind, GridConfig, GridGraph, GridPoint, Heuristic, Point,
        RrtConfig, RrtNode, RrtPlanner, RrtStarConfig, RrtStarPlanner, SearchResult, TreeResult,
        Workspace,
    };
    pub use nalgebra;
}

pub use prelude::*;
