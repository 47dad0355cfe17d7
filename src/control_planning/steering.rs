//! Turn-and-drive steering
//!
//! A deterministic [`SearchCapability`] that connects start and goal with
//! the simplest motion the car allows: rotate in place toward the goal,
//! drive straight to it, and (only when a yaw tolerance is requested)
//! rotate to the goal heading. It does no search; if that one motion is
//! blocked or the car cannot perform it, it reports no solution.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use log::debug;

use crate::common::{
    normalize_angle, ControlInput, PlanningResult, SearchCapability, SearchReport, SearchRequest,
};
use crate::control_planning::ControlStep;

/// Configuration for turn-and-drive steering
#[derive(Debug, Clone)]
pub struct SteeringConfig {
    /// Longest duration of a single emitted step [s]; <= 0 emits one step
    /// per segment
    pub max_step_duration: f64,
    /// Headings closer than this are not corrected [rad]
    pub heading_epsilon: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_step_duration: 0.5,
            heading_epsilon: 1e-9,
        }
    }
}

pub struct TurnAndDrive {
    config: SteeringConfig,
}

impl TurnAndDrive {
    pub fn new(config: SteeringConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(SteeringConfig::default())
    }

    /// Turn rate and signed rotation that reach heading offset `delta`.
    ///
    /// Prefers the short way; when the turn-rate bounds only allow the other
    /// direction, turns the long way round instead.
    fn turn(request: &SearchRequest<'_>, delta: f64) -> Option<(f64, f64)> {
        let long_way = if delta > 0.0 { delta - 2.0 * PI } else { delta + 2.0 * PI };
        [delta, long_way].iter().find_map(|&angle| {
            let omega = if angle > 0.0 {
                request.control_bounds.high()[1]
            } else {
                request.control_bounds.low()[1]
            };
            if omega * angle > 0.0 {
                Some((omega, angle))
            } else {
                None
            }
        })
    }

    fn plan(
        &self,
        request: &SearchRequest<'_>,
        started: Instant,
        budget: Duration,
    ) -> PlanningResult<Option<Vec<ControlStep>>> {
        let mut segments: Vec<(ControlInput, f64)> = Vec::new();

        let dx = request.goal.x - request.start.x;
        let dy = request.goal.y - request.start.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let mut heading = request.start.yaw;

        if dist > request.goal_tolerance {
            let speed = request.control_bounds.high()[0];
            if speed <= 0.0 {
                debug!("forward speed bound {} does not allow driving", speed);
                return Ok(None);
            }

            let delta = normalize_angle(dy.atan2(dx) - heading);
            if delta.abs() > self.config.heading_epsilon {
                match Self::turn(request, delta) {
                    Some((omega, angle)) => {
                        segments.push((ControlInput::new(0.0, omega), angle / omega));
                        heading += angle;
                    }
                    None => return Ok(None),
                }
            }
            segments.push((ControlInput::new(speed, 0.0), dist / speed));
        }

        if request.yaw_tolerance.is_some() {
            let delta = normalize_angle(request.goal.yaw - heading);
            if delta.abs() > self.config.heading_epsilon {
                match Self::turn(request, delta) {
                    Some((omega, angle)) => segments.push((ControlInput::new(0.0, omega), angle / omega)),
                    None => return Ok(None),
                }
            }
        }

        if segments.is_empty() {
            // already inside the goal region
            return Ok(Some(vec![ControlStep::new(ControlInput::zero(), 0.0)]));
        }

        let mut steps = Vec::new();
        let mut pose = request.start;
        for (control, duration) in segments {
            let n = if self.config.max_step_duration > 0.0 {
                ((duration / self.config.max_step_duration).ceil() as usize).max(1)
            } else {
                1
            };
            let dt = duration / n as f64;
            for _ in 0..n {
                if started.elapsed() >= budget {
                    debug!("time budget exhausted after {} steps", steps.len());
                    return Ok(None);
                }
                pose = request.propagator.propagate(&pose, &control, dt)?;
                if !request.validity.is_valid(&pose) {
                    debug!("steering blocked at {}", pose);
                    return Ok(None);
                }
                steps.push(ControlStep::new(control, dt));
            }
        }

        if !request.is_goal_satisfied(&pose) {
            debug!("steering ended at {}, outside the goal region", pose);
            return Ok(None);
        }
        Ok(Some(steps))
    }
}

impl Default for TurnAndDrive {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SearchCapability for TurnAndDrive {
    fn search(&mut self, request: &SearchRequest<'_>) -> SearchReport {
        let budget = Duration::try_from_secs_f64(request.time_budget).unwrap_or(Duration::MAX);

        match self.plan(request, Instant::now(), budget) {
            Ok(Some(steps)) => SearchReport::found(steps),
            Ok(None) => SearchReport::not_found(),
            Err(e) => {
                debug!("steering propagation failed: {}", e);
                SearchReport::not_found()
            }
        }
    }
}
