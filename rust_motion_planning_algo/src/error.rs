//! Error types for the planners

use thiserror::Error;

/// Configuration errors, raised before any search or tree growth begins.
///
/// Failing to find a path is not an error; see
/// [`SearchResult`](crate::path_planning::SearchResult) and
/// [`TreeResult`](crate::path_planning::TreeResult).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    #[error("connectivity must be 4 or 8, got {0}")]
    InvalidConnectivity(u8),
    #[error("grid resolution must be at least 1")]
    InvalidResolution,
    #[error("workspace bounds must be positive and finite, got {width} x {height}")]
    InvalidBounds { width: f64, height: f64 },
    #[error("obstacle radius must be non-negative and finite, got {0}")]
    InvalidObstacleRadius(f64),
    #[error("obstacle radius range is empty: [{min}, {max}]")]
    InvalidRadiusRange { min: f64, max: f64 },
    #[error("step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),
    #[error("max iterations must be positive")]
    InvalidMaxIterations,
    #[error("goal sample rate must lie in [0, 1], got {0}")]
    InvalidGoalSampleRate(f64),
    #[error("neighbor radius must be non-negative and finite, got {0}")]
    InvalidNeighborRadius(f64),
}
