//! Headless motion planning runner.
//!
//! Builds a workspace from a YAML scenario (or a seeded random obstacle
//! field), runs one planner and optionally writes the result as YAML for an
//! external plotting tool.
//!
//! # Usage
//!
//! ```bash
//! # A* on a random field, 8-connected grid
//! motion-plan --algorithm a-star --obstacles 20 --seed 52 --connectivity 8
//!
//! # RRT* from a scenario file, saving path and tree
//! motion-plan --algorithm rrt-star --scenario two_pillars.yaml --output result.yaml
//! ```

mod report;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rust_motion_planning_algo::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use report::PlanReport;
use scenario::{to_grid_point, RandomObstacles, Scenario};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
    Rrt,
    RrtStar,
}

impl AlgorithmArg {
    fn graph_search(self) -> Option<GraphSearchKind> {
        match self {
            AlgorithmArg::Bfs => Some(GraphSearchKind::Bfs),
            AlgorithmArg::Dfs => Some(GraphSearchKind::Dfs),
            AlgorithmArg::Dijkstra => Some(GraphSearchKind::Dijkstra),
            AlgorithmArg::AStar => Some(GraphSearchKind::AStar),
            AlgorithmArg::Rrt | AlgorithmArg::RrtStar => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Euclidean,
}

impl From<HeuristicArg> for Heuristic {
    fn from(value: HeuristicArg) -> Self {
        match value {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Euclidean => Heuristic::Euclidean,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "motion-plan")]
#[command(about = "Run a 2D motion planner on a circular-obstacle workspace")]
struct Args {
    /// Planner to run
    #[arg(short, long, value_enum, default_value = "a-star")]
    algorithm: AlgorithmArg,

    /// YAML scenario file; flags below override its values
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of random obstacles (replaces any listed obstacles)
    #[arg(long)]
    obstacles: Option<usize>,

    /// Seed for the obstacle field
    #[arg(long)]
    seed: Option<u64>,

    /// Seed for the tree planners' sampling
    #[arg(long)]
    sample_seed: Option<u64>,

    /// Grid connectivity (4 or 8)
    #[arg(long)]
    connectivity: Option<u8>,

    /// Grid resolution in world units
    #[arg(long)]
    resolution: Option<u32>,

    /// A* heuristic
    #[arg(long, value_enum)]
    heuristic: Option<HeuristicArg>,

    /// Tree planner step size
    #[arg(long)]
    step_size: Option<f64>,

    /// Tree planner iteration budget
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Probability of sampling the goal
    #[arg(long)]
    goal_sample_rate: Option<f64>,

    /// RRT* neighbor radius
    #[arg(long)]
    neighbor_radius: Option<f64>,

    /// Write the result as YAML
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of `scenario`
    fn apply(&self, scenario: &mut Scenario) -> Result<()> {
        if self.obstacles.is_some() || self.seed.is_some() {
            let random = scenario.random.get_or_insert_with(RandomObstacles::default);
            if let Some(count) = self.obstacles {
                random.count = count;
            }
            if let Some(seed) = self.seed {
                random.seed = seed;
            }
        }
        if let Some(connectivity) = self.connectivity {
            scenario.grid.connectivity = Connectivity::try_from(connectivity)?;
        }
        if let Some(resolution) = self.resolution {
            scenario.grid.resolution = resolution;
        }
        if let Some(heuristic) = self.heuristic {
            scenario.heuristic = heuristic.into();
        }
        for base in [&mut scenario.rrt, &mut scenario.rrt_star.base] {
            if let Some(step_size) = self.step_size {
                base.step_size = step_size;
            }
            if let Some(max_iterations) = self.max_iterations {
                base.max_iterations = max_iterations;
            }
            if let Some(rate) = self.goal_sample_rate {
                base.goal_sample_rate = rate;
            }
            if self.sample_seed.is_some() {
                base.seed = self.sample_seed;
            }
        }
        if let Some(radius) = self.neighbor_radius {
            scenario.rrt_star.neighbor_radius = radius;
        }
        Ok(())
    }
}

fn run(args: &Args) -> Result<PlanReport> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    args.apply(&mut scenario)?;

    let workspace = scenario.workspace()?;
    let start = scenario.start_point();
    let goal = scenario.goal_point();
    if workspace.is_inside_any_obstacle(&start) || workspace.is_inside_any_obstacle(&goal) {
        warn!("start or goal lies inside an obstacle; expect no path");
    }
    info!(
        width = workspace.width(),
        height = workspace.height(),
        obstacles = workspace.obstacles().len(),
        "workspace ready"
    );

    let report = match args.algorithm.graph_search() {
        Some(kind) => {
            let graph =
                GridGraph::build(&workspace, &scenario.grid).context("failed to build grid")?;
            let (grid_start, grid_goal) = (to_grid_point(&start), to_grid_point(&goal));
            let result = match kind {
                GraphSearchKind::AStar => AStarPlanner::with_heuristic(&graph, scenario.heuristic)
                    .plan(grid_start, grid_goal),
                other => other.plan(&graph, grid_start, grid_goal),
            };
            PlanReport::from_search(kind, &workspace, &start, &goal, &result)
        }
        None if args.algorithm == AlgorithmArg::Rrt => {
            let planner = RrtPlanner::new(&workspace, scenario.rrt.clone())
                .context("invalid RRT configuration")?;
            let result = planner.plan(start, goal);
            PlanReport::from_tree("RRT", &workspace, &start, &goal, &result)
        }
        None => {
            let planner = RrtStarPlanner::new(&workspace, scenario.rrt_star.clone())
                .context("invalid RRT* configuration")?;
            let result = planner.plan(start, goal);
            PlanReport::from_tree("RRT*", &workspace, &start, &goal, &result)
        }
    };

    Ok(report)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let report = run(&args)?;

    match report.cost {
        Some(cost) if report.success => info!(
            algorithm = %report.algorithm,
            points = report.path.len(),
            cost = %format!("{cost:.2}"),
            iterations = report.iterations,
            "path found"
        ),
        _ => warn!(
            algorithm = %report.algorithm,
            iterations = report.iterations,
            "no path found"
        ),
    }

    if let Some(output) = &args.output {
        report.write_yaml(output)?;
        info!(path = %output.display(), "wrote result");
    }

    Ok(())
}
