//! Capability traits wired into a planning problem

use crate::common::error::PlanningResult;
use crate::common::types::*;
use crate::control_planning::{Bounds, ControlStep};

/// Advances a pose under a control held for a duration
pub trait StatePropagator: Send + Sync {
    fn propagate(&self, start: &Pose2D, control: &ControlInput, duration: f64)
        -> PlanningResult<Pose2D>;
}

/// Decides whether a pose may appear anywhere along a plan
pub trait StateValidityChecker: Send + Sync {
    fn is_valid(&self, pose: &Pose2D) -> bool;
}

impl<F> StateValidityChecker for F
where
    F: Fn(&Pose2D) -> bool + Send + Sync,
{
    fn is_valid(&self, pose: &Pose2D) -> bool {
        self(pose)
    }
}

/// Everything a search capability may use to look for a control sequence.
///
/// The request borrows the problem's capabilities; it lives only for the
/// duration of one `search` call.
pub struct SearchRequest<'a> {
    pub propagator: &'a dyn StatePropagator,
    pub validity: &'a dyn StateValidityChecker,
    /// Controls returned by the search must lie within these bounds
    pub control_bounds: &'a Bounds,
    pub start: Pose2D,
    pub goal: Pose2D,
    /// Maximum Euclidean (x, y) distance between the final pose and the goal
    pub goal_tolerance: f64,
    /// Maximum wrapped heading error at the goal, when orientation matters
    pub yaw_tolerance: Option<f64>,
    /// Soft wall-clock deadline in seconds
    pub time_budget: f64,
}

impl<'a> SearchRequest<'a> {
    /// Whether a pose satisfies the goal region of this request
    pub fn is_goal_satisfied(&self, pose: &Pose2D) -> bool {
        let close = pose.position().distance(&self.goal.position()) <= self.goal_tolerance;
        match self.yaw_tolerance {
            Some(tol) => close && pose.yaw_distance(&self.goal) <= tol,
            None => close,
        }
    }
}

/// What a search capability hands back
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    pub found: bool,
    pub steps: Vec<ControlStep>,
}

impl SearchReport {
    pub fn found(steps: Vec<ControlStep>) -> Self {
        Self { found: true, steps }
    }

    pub fn not_found() -> Self {
        Self { found: false, steps: Vec::new() }
    }
}

/// Black-box search plugged in behind `PlanningProblem::solve`
pub trait SearchCapability {
    fn search(&mut self, request: &SearchRequest<'_>) -> SearchReport;
}
