//! Control sequences and their geometric rendering

use std::fmt;

use itertools::Itertools;

use crate::common::{ControlInput, PlanningError, PlanningResult, Pose2D, StatePropagator};

/// A control held for a duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlStep {
    pub control: ControlInput,
    pub duration: f64,
}

impl ControlStep {
    pub fn new(control: ControlInput, duration: f64) -> Self {
        Self { control, duration }
    }
}

/// Ordered sequence of control steps applied from a start pose
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPath {
    steps: Vec<ControlStep>,
}

impl ControlPath {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn from_steps(steps: Vec<ControlStep>) -> Self {
        Self { steps }
    }

    pub fn push(&mut self, step: ControlStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[ControlStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_duration(&self) -> f64 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Start pose followed by the pose reached after each step
    pub fn poses(
        &self,
        propagator: &dyn StatePropagator,
        start: Pose2D,
    ) -> PlanningResult<Vec<Pose2D>> {
        let mut poses = Vec::with_capacity(self.steps.len() + 1);
        poses.push(start);
        let mut current = start;
        for step in &self.steps {
            current = propagator.propagate(&current, &step.control, step.duration)?;
            poses.push(current);
        }
        Ok(poses)
    }

    pub fn final_pose(
        &self,
        propagator: &dyn StatePropagator,
        start: Pose2D,
    ) -> PlanningResult<Pose2D> {
        self.steps.iter().try_fold(start, |pose, step| {
            propagator.propagate(&pose, &step.control, step.duration)
        })
    }

    /// Geometric rendering: every step is split into equal sub-steps no
    /// longer than `step_size` and the intermediate poses are collected.
    pub fn interpolate(
        &self,
        propagator: &dyn StatePropagator,
        start: Pose2D,
        step_size: f64,
    ) -> PlanningResult<Vec<Pose2D>> {
        if !(step_size > 0.0) {
            return Err(PlanningError::InvalidArgument(format!(
                "interpolation step size must be > 0, got {}",
                step_size
            )));
        }

        let mut poses = vec![start];
        let mut current = start;
        for step in &self.steps {
            let n = ((step.duration / step_size).ceil() as usize).max(1);
            let dt = step.duration / n as f64;
            for _ in 0..n {
                current = propagator.propagate(&current, &step.control, dt)?;
                poses.push(current);
            }
        }
        Ok(poses)
    }
}

impl fmt::Display for ControlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .steps
            .iter()
            .map(|s| format!("{:.6} {:.6} {:.6}", s.control.v, s.control.omega, s.duration))
            .join("\n");
        write!(f, "{}", lines)
    }
}

/// Render poses one per line as `x y yaw`
pub fn format_poses(poses: &[Pose2D]) -> String {
    poses.iter().map(|p| p.to_string()).join("\n")
}
