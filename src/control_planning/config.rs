//! Planning problem configuration
//!
//! Defaults reproduce the classic kinematic car setup: a `[-1, 1]^2`
//! workspace, `|v|, |omega| <= 0.3`, start `(-0.5, 0, 0)`, goal
//! `(0, 0.5, 0)`, tolerance 0.05 and a 20 s budget. Any subset of fields
//! may be overridden from TOML.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::common::{PlanningError, PlanningResult, Pose2D};
use crate::control_planning::{
    Bounds, ControlModel, PlanningProblem, PoseSpace, SteeringConfig,
};

/// `[x, y, yaw]` as written in config files
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PoseConfig(pub f64, pub f64, pub f64);

impl From<PoseConfig> for Pose2D {
    fn from(p: PoseConfig) -> Self {
        Pose2D::new(p.0, p.1, p.2)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoundsConfig {
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl BoundsConfig {
    pub fn uniform(dim: usize, low: f64, high: f64) -> Self {
        Self {
            low: vec![low; dim],
            high: vec![high; dim],
        }
    }

    pub fn to_bounds(&self) -> PlanningResult<Bounds> {
        Bounds::from_slices(&self.low, &self.high)
    }
}

/// Shortest accepted step duration [s]
pub const MIN_STEP_DURATION: f64 = 1e-4;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Position bounds of the pose space
    pub space: BoundsConfig,
    /// `(v, omega)` bounds of the control model
    pub control: BoundsConfig,
    pub start: PoseConfig,
    pub goal: PoseConfig,
    /// Euclidean position tolerance at the goal
    pub goal_tolerance: f64,
    /// Heading tolerance at the goal; unset means position-only goals
    pub yaw_tolerance: Option<f64>,
    /// Search time budget [s]
    pub time_budget: f64,
    /// Longest step emitted by turn-and-drive steering [s]
    pub max_step_duration: f64,
    /// Sub-step used when rendering the solution as poses [s]
    pub interpolation_step: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            space: BoundsConfig::uniform(2, -1.0, 1.0),
            control: BoundsConfig::uniform(2, -0.3, 0.3),
            start: PoseConfig(-0.5, 0.0, 0.0),
            goal: PoseConfig(0.0, 0.5, 0.0),
            goal_tolerance: 0.05,
            yaw_tolerance: None,
            time_budget: 20.0,
            max_step_duration: SteeringConfig::default().max_step_duration,
            interpolation_step: 0.1,
        }
    }
}

impl PlanningConfig {
    pub fn from_toml_str(s: &str) -> PlanningResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> PlanningResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check the step durations, which size every stepping loop
    pub fn validate(&self) -> PlanningResult<()> {
        let steps = [
            ("max_step_duration", self.max_step_duration),
            ("interpolation_step", self.interpolation_step),
        ];
        for &(name, value) in &steps {
            if !value.is_finite() || value < MIN_STEP_DURATION {
                return Err(PlanningError::ConfigError(format!(
                    "{} must be a finite duration >= {} s, got {}",
                    name, MIN_STEP_DURATION, value
                )));
            }
        }
        Ok(())
    }

    pub fn steering(&self) -> SteeringConfig {
        SteeringConfig {
            max_step_duration: self.max_step_duration,
            ..SteeringConfig::default()
        }
    }

    /// Build the pose space, control model and problem described here.
    ///
    /// Bounds errors surface immediately; start/goal checks are left to
    /// `PlanningProblem::solve`.
    pub fn build_problem(&self) -> PlanningResult<PlanningProblem> {
        self.validate()?;
        let space = Arc::new(PoseSpace::new(self.space.to_bounds()?)?);
        let model = Arc::new(ControlModel::new(self.control.to_bounds()?)?);

        let problem = PlanningProblem::new(
            space,
            model,
            self.start.into(),
            self.goal.into(),
            self.goal_tolerance,
        );
        Ok(match self.yaw_tolerance {
            Some(tol) => problem.with_yaw_tolerance(tol),
            None => problem,
        })
    }
}
