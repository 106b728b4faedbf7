//! Planner output in a renderer-friendly shape

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_motion_planning_algo::prelude::*;
use serde::Serialize;

/// Result of one planning run, ready to hand to a plotting tool
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub algorithm: String,
    pub width: f64,
    pub height: f64,
    pub obstacles: Vec<CircleObstacle>,
    pub start: [f64; 2],
    pub goal: [f64; 2],
    pub success: bool,
    /// Graph cost, or summed segment length for tree planners
    pub cost: Option<f64>,
    /// Expanded nodes for graph searches, iterations for tree planners
    pub iterations: usize,
    pub path: Vec<[f64; 2]>,
    /// Tree edges; empty for graph searches
    pub edges: Vec<[[f64; 2]; 2]>,
}

fn xy(point: &Point) -> [f64; 2] {
    [point.x, point.y]
}

impl PlanReport {
    fn base(algorithm: &str, workspace: &Workspace, start: &Point, goal: &Point) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            width: workspace.width(),
            height: workspace.height(),
            obstacles: workspace.obstacles().to_vec(),
            start: xy(start),
            goal: xy(goal),
            success: false,
            cost: None,
            iterations: 0,
            path: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn from_search(
        kind: GraphSearchKind,
        workspace: &Workspace,
        start: &Point,
        goal: &Point,
        result: &SearchResult,
    ) -> Self {
        Self {
            success: result.is_found(),
            cost: result.cost,
            iterations: result.expanded,
            path: grid_path_to_points(&result.path).iter().map(xy).collect(),
            ..Self::base(kind.label(), workspace, start, goal)
        }
    }

    pub fn from_tree(
        algorithm: &str,
        workspace: &Workspace,
        start: &Point,
        goal: &Point,
        result: &TreeResult,
    ) -> Self {
        Self {
            success: result.success,
            cost: result.success.then(|| path_length(&result.path)),
            iterations: result.iterations,
            path: result.path.iter().map(xy).collect(),
            edges: result
                .edges
                .iter()
                .map(|(from, to)| [xy(from), xy(to)])
                .collect(),
            ..Self::base(algorithm, workspace, start, goal)
        }
    }

    pub fn write_yaml(&self, path: &Path) -> Result<()> {
        let text = serde_yaml::to_string(self).context("failed to serialize report")?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }
}
