//! Kinematic car planning problem
//!
//! Bundles the pose space, the control model, start and goal poses and
//! the validity predicate, and hands them to a [`SearchCapability`].
//!
//! `solve` separates two kinds of outcome:
//! - a malformed problem is an `Err(PlanningError::InvalidProblem)` and the
//!   search is never started;
//! - a well-formed problem always yields `Ok(outcome)`, where `outcome` is
//!   either the verified control path or a [`PlanningFailure`].

use std::sync::Arc;

use log::{debug, info, warn};

use crate::common::{
    PlanningError, PlanningFailure, PlanningResult, Pose2D, SearchCapability, SearchReport,
    SearchRequest, StatePropagator, StateValidityChecker,
};
use crate::control_planning::{BoundsValidityChecker, ControlModel, ControlPath, PoseSpace};

/// Expected result of a solve call on a well-formed problem
pub type PlanningOutcome = Result<ControlPath, PlanningFailure>;

pub struct PlanningProblem {
    space: Arc<PoseSpace>,
    model: Arc<ControlModel>,
    propagator: Arc<dyn StatePropagator>,
    validity: Arc<dyn StateValidityChecker>,
    start: Pose2D,
    goal: Pose2D,
    goal_tolerance: f64,
    yaw_tolerance: Option<f64>,
}

impl PlanningProblem {
    /// Create a problem whose propagator is `model` and whose validity
    /// predicate is the pose space bounds.
    pub fn new(
        space: Arc<PoseSpace>,
        model: Arc<ControlModel>,
        start: Pose2D,
        goal: Pose2D,
        goal_tolerance: f64,
    ) -> Self {
        let validity: Arc<dyn StateValidityChecker> =
            Arc::new(BoundsValidityChecker::new(Arc::clone(&space)));
        let propagator: Arc<dyn StatePropagator> = model.clone();

        Self {
            space,
            model,
            propagator,
            validity,
            start,
            goal,
            goal_tolerance,
            yaw_tolerance: None,
        }
    }

    /// Also require the final heading to be within `tolerance` of the goal yaw
    pub fn with_yaw_tolerance(mut self, tolerance: f64) -> Self {
        self.yaw_tolerance = Some(tolerance);
        self
    }

    pub fn with_validity_checker(mut self, validity: Arc<dyn StateValidityChecker>) -> Self {
        self.validity = validity;
        self
    }

    pub fn with_propagator(mut self, propagator: Arc<dyn StatePropagator>) -> Self {
        self.propagator = propagator;
        self
    }

    pub fn space(&self) -> &PoseSpace {
        &self.space
    }

    pub fn model(&self) -> &ControlModel {
        &self.model
    }

    pub fn propagator(&self) -> &dyn StatePropagator {
        self.propagator.as_ref()
    }

    pub fn start(&self) -> Pose2D {
        self.start
    }

    pub fn goal(&self) -> Pose2D {
        self.goal
    }

    pub fn goal_tolerance(&self) -> f64 {
        self.goal_tolerance
    }

    pub fn yaw_tolerance(&self) -> Option<f64> {
        self.yaw_tolerance
    }

    pub fn is_valid(&self, pose: &Pose2D) -> bool {
        self.validity.is_valid(pose)
    }

    /// Position within `goal_tolerance`, and heading within the yaw
    /// tolerance when one is set
    pub fn is_goal_satisfied(&self, pose: &Pose2D) -> bool {
        let close = self.space.position_distance(pose, &self.goal) <= self.goal_tolerance;
        match self.yaw_tolerance {
            Some(tol) => close && pose.yaw_distance(&self.goal) <= tol,
            None => close,
        }
    }

    /// Check everything that must hold before a search may start
    pub fn validate(&self, time_budget: f64) -> PlanningResult<()> {
        if !self.space.contains(&self.start) {
            return Err(PlanningError::invalid_problem(
                "start",
                format!("({}, {}) is outside the pose space bounds", self.start.x, self.start.y),
            ));
        }
        if !self.space.contains(&self.goal) {
            return Err(PlanningError::invalid_problem(
                "goal",
                format!("({}, {}) is outside the pose space bounds", self.goal.x, self.goal.y),
            ));
        }
        if !self.validity.is_valid(&self.start) {
            return Err(PlanningError::invalid_problem(
                "start",
                "rejected by the validity predicate",
            ));
        }
        if !(time_budget > 0.0) || !time_budget.is_finite() {
            return Err(PlanningError::invalid_problem(
                "time_budget",
                format!("must be a finite value > 0, got {}", time_budget),
            ));
        }
        if !(self.goal_tolerance >= 0.0) || !self.goal_tolerance.is_finite() {
            return Err(PlanningError::invalid_problem(
                "goal_tolerance",
                format!("must be a finite value >= 0, got {}", self.goal_tolerance),
            ));
        }
        if let Some(tol) = self.yaw_tolerance {
            if !(tol >= 0.0) {
                return Err(PlanningError::invalid_problem(
                    "yaw_tolerance",
                    format!("must be >= 0, got {}", tol),
                ));
            }
        }
        Ok(())
    }

    /// Validate the problem, delegate to `search` and verify what it found.
    ///
    /// Every call is an independent search with a fresh `time_budget`
    /// (seconds); nothing is remembered between calls.
    pub fn solve<S>(&self, search: &mut S, time_budget: f64) -> PlanningResult<PlanningOutcome>
    where
        S: SearchCapability + ?Sized,
    {
        self.validate(time_budget)?;

        let request = SearchRequest {
            propagator: self.propagator.as_ref(),
            validity: self.validity.as_ref(),
            control_bounds: self.model.bounds(),
            start: self.start,
            goal: self.goal,
            goal_tolerance: self.goal_tolerance,
            yaw_tolerance: self.yaw_tolerance,
            time_budget,
        };

        debug!(
            "searching from {} to {} (tolerance {}, budget {} s)",
            self.start, self.goal, self.goal_tolerance, time_budget
        );
        let report = search.search(&request);

        if !report.found {
            info!("search reported no solution within {} s", time_budget);
            return Ok(Err(PlanningFailure::NotFound));
        }

        match self.verify(&report) {
            Ok(()) => {
                let path = ControlPath::from_steps(report.steps);
                info!(
                    "found solution with {} steps, duration {:.3}",
                    path.len(),
                    path.total_duration()
                );
                Ok(Ok(path))
            }
            Err(reason) => {
                warn!("search result rejected: {}", reason);
                Ok(Err(PlanningFailure::InvalidSolution(reason)))
            }
        }
    }

    /// Replay the reported steps from the start pose
    fn verify(&self, report: &SearchReport) -> Result<(), String> {
        if report.steps.is_empty() {
            return Err("empty control sequence".to_string());
        }

        let mut pose = self.start;
        for (i, step) in report.steps.iter().enumerate() {
            if !(step.duration >= 0.0) {
                return Err(format!("step {} has invalid duration {}", i, step.duration));
            }
            if !self.model.contains(&step.control) {
                return Err(format!(
                    "step {} control ({}, {}) is outside the control bounds",
                    i, step.control.v, step.control.omega
                ));
            }
            pose = self
                .propagator
                .propagate(&pose, &step.control, step.duration)
                .map_err(|e| format!("step {}: {}", i, e))?;
            if !self.validity.is_valid(&pose) {
                return Err(format!("step {} reaches invalid pose {}", i, pose));
            }
        }

        if !self.is_goal_satisfied(&pose) {
            return Err(format!(
                "final pose {} is {:.4} from the goal",
                pose,
                self.space.position_distance(&pose, &self.goal)
            ));
        }
        Ok(())
    }
}
