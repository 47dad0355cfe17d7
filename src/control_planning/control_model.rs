//! Kinematic car control model
//!
//! Bounded `(v, omega)` control space plus the closed-form single-step
//! update used to propagate a pose:
//!
//! ```text
//! x'   = x   + v * dt * cos(yaw)
//! y'   = y   + v * dt * sin(yaw)
//! yaw' = yaw + omega * dt
//! ```
//!
//! The step is applied exactly once per call; there is no sub-stepping.

use log::trace;
use rand::Rng;

use crate::common::{
    ControlInput, PlanningError, PlanningResult, Pose2D, StatePropagator, StateValidityChecker,
};
use crate::control_planning::Bounds;

/// Bounded 2D control space with the kinematic car propagation law
#[derive(Debug, Clone)]
pub struct ControlModel {
    bounds: Bounds,
}

impl ControlModel {
    pub fn new(bounds: Bounds) -> PlanningResult<Self> {
        if bounds.dimension() != 2 {
            return Err(PlanningError::InvalidBounds(format!(
                "control model needs 2D (v, omega) bounds, got dimension {}",
                bounds.dimension()
            )));
        }
        Ok(Self { bounds })
    }

    /// Same interval `[low, high]` for both speed and turn rate
    pub fn symmetric(low: f64, high: f64) -> PlanningResult<Self> {
        Self::new(Bounds::uniform(2, low, high)?)
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Update a pose under `control` held for `duration`.
    ///
    /// Control bounds are not checked here; whoever picks the control
    /// (a sampler or a search) is responsible for them.
    ///
    /// # Arguments
    /// * `start` - Pose at the beginning of the step
    /// * `control` - Forward speed and turn rate
    /// * `duration` - Step length, must be >= 0
    pub fn propagate(
        &self,
        start: &Pose2D,
        control: &ControlInput,
        duration: f64,
    ) -> PlanningResult<Pose2D> {
        if !(duration >= 0.0) {
            return Err(PlanningError::InvalidArgument(format!(
                "propagation duration must be >= 0, got {}",
                duration
            )));
        }

        Ok(Pose2D {
            x: start.x + control.v * duration * start.yaw.cos(),
            y: start.y + control.v * duration * start.yaw.sin(),
            yaw: start.yaw + control.omega * duration,
        })
    }

    pub fn contains(&self, control: &ControlInput) -> bool {
        self.bounds.contains(&[control.v, control.omega])
    }

    pub fn enforce_bounds(&self, control: &ControlInput) -> ControlInput {
        let c = self.bounds.clamp(&[control.v, control.omega]);
        ControlInput::new(c[0], c[1])
    }

    /// Uniformly sample a control inside the bounds
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> ControlInput {
        let low = self.bounds.low();
        let high = self.bounds.high();
        ControlInput::new(
            rng.gen_range(low[0]..=high[0]),
            rng.gen_range(low[1]..=high[1]),
        )
    }

    /// Apply `control` for `steps` steps of `step_size`, stopping at the
    /// first pose rejected by `validity`.
    ///
    /// Returns the poses reached after each valid step; the start pose is
    /// not included. An empty result means the first step was already
    /// invalid.
    pub fn propagate_while_valid(
        &self,
        start: &Pose2D,
        control: &ControlInput,
        steps: usize,
        step_size: f64,
        validity: &dyn StateValidityChecker,
    ) -> PlanningResult<Vec<Pose2D>> {
        let mut poses = Vec::with_capacity(steps);
        let mut current = *start;

        for i in 0..steps {
            let next = self.propagate(&current, control, step_size)?;
            if !validity.is_valid(&next) {
                trace!("propagation left the valid region after {} of {} steps", i, steps);
                break;
            }
            poses.push(next);
            current = next;
        }

        Ok(poses)
    }
}

impl StatePropagator for ControlModel {
    fn propagate(
        &self,
        start: &Pose2D,
        control: &ControlInput,
        duration: f64,
    ) -> PlanningResult<Pose2D> {
        ControlModel::propagate(self, start, control, duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    fn car() -> ControlModel {
        ControlModel::symmetric(-0.3, 0.3).unwrap()
    }

    #[test]
    fn test_propagate_straight() {
        let model = car();
        let next = model
            .propagate(&Pose2D::origin(), &ControlInput::new(0.3, 0.0), 1.0)
            .unwrap();

        assert!((next.x - 0.3).abs() < 1e-10);
        assert!(next.y.abs() < 1e-10);
        assert!(next.yaw.abs() < 1e-10);
    }

    #[test]
    fn test_propagate_matches_closed_form_exactly() {
        let model = car();
        let start = Pose2D::new(-0.5, 0.1, 0.7);
        let control = ControlInput::new(0.25, -0.2);
        let dt = 1.3;

        let next = model.propagate(&start, &control, dt).unwrap();

        assert_eq!(next.x, start.x + control.v * dt * start.yaw.cos());
        assert_eq!(next.y, start.y + control.v * dt * start.yaw.sin());
        assert_eq!(next.yaw, start.yaw + control.omega * dt);
    }

    #[test]
    fn test_propagate_is_deterministic() {
        let model = car();
        let start = Pose2D::new(0.2, -0.4, 2.1);
        let control = ControlInput::new(-0.17, 0.29);

        let a = model.propagate(&start, &control, 0.77).unwrap();
        let b = model.propagate(&start, &control, 0.77).unwrap();

        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.yaw.to_bits(), b.yaw.to_bits());
    }

    #[test]
    fn test_zero_duration_returns_start() {
        let model = car();
        let start = Pose2D::new(0.3, 0.4, -1.2);
        let next = model.propagate(&start, &ControlInput::new(0.3, 0.3), 0.0).unwrap();
        assert!((next.x - start.x).abs() < 1e-12);
        assert!((next.y - start.y).abs() < 1e-12);
        assert!((next.yaw - start.yaw).abs() < 1e-12);
    }

    #[test]
    fn test_zero_speed_only_turns() {
        let model = car();
        let start = Pose2D::new(0.3, 0.4, 0.5);
        let next = model.propagate(&start, &ControlInput::new(0.0, 0.2), 2.0).unwrap();
        assert_eq!(next.x, start.x);
        assert_eq!(next.y, start.y);
        assert!((next.yaw - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_yaw_is_not_wrapped() {
        let model = car();
        let next = model
            .propagate(&Pose2D::new(0.0, 0.0, 3.0), &ControlInput::new(0.0, 0.3), 10.0)
            .unwrap();
        assert!(next.yaw > PI);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let model = car();
        let err = model
            .propagate(&Pose2D::origin(), &ControlInput::zero(), -0.1)
            .unwrap_err();
        assert!(matches!(err, PlanningError::InvalidArgument(_)));
        assert!(model.propagate(&Pose2D::origin(), &ControlInput::zero(), f64::NAN).is_err());
    }

    #[test]
    fn test_propagate_ignores_control_bounds() {
        let model = car();
        let next = model
            .propagate(&Pose2D::origin(), &ControlInput::new(2.0, 0.0), 1.0)
            .unwrap();
        assert!((next.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let bounds = Bounds::from_slices(&[-0.3, 0.3], &[0.3, -0.3]);
        assert!(matches!(bounds, Err(PlanningError::InvalidBounds(_))));
        assert!(matches!(ControlModel::symmetric(0.3, -0.3), Err(PlanningError::InvalidBounds(_))));
    }

    #[test]
    fn test_contains_and_enforce_bounds() {
        let model = car();
        assert!(model.contains(&ControlInput::new(0.3, -0.3)));
        assert!(!model.contains(&ControlInput::new(0.31, 0.0)));
        let c = model.enforce_bounds(&ControlInput::new(1.0, -1.0));
        assert_eq!(c, ControlInput::new(0.3, -0.3));
    }

    #[test]
    fn test_sampled_controls_within_bounds() {
        let model = car();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert!(model.contains(&model.sample_uniform(&mut rng)));
        }
    }

    #[test]
    fn test_propagate_while_valid_stops_at_boundary() {
        let model = car();
        let validity = |p: &Pose2D| p.x <= 1.0;
        // 0.3 m/s for 1 s steps from x = 0: x = 0.3, 0.6, 0.9 valid, 1.2 invalid
        let poses = model
            .propagate_while_valid(
                &Pose2D::origin(),
                &ControlInput::new(0.3, 0.0),
                10,
                1.0,
                &validity,
            )
            .unwrap();

        assert_eq!(poses.len(), 3);
        assert!((poses[2].x - 0.9).abs() < 1e-10);
    }

    #[test]
    fn test_state_propagator_delegates() {
        let model = car();
        let propagator: &dyn StatePropagator = &model;
        let a = propagator
            .propagate(&Pose2D::origin(), &ControlInput::new(0.1, 0.1), 1.0)
            .unwrap();
        let b = model
            .propagate(&Pose2D::origin(), &ControlInput::new(0.1, 0.1), 1.0)
            .unwrap();
        assert_eq!(a, b);
    }
}
