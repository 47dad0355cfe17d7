//! Bounded SE(2) pose space
//!
//! Position is confined to an axis-aligned box; heading is unconstrained.

use std::f64::consts::PI;
use std::sync::Arc;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::common::{normalize_angle, PlanningError, PlanningResult, Pose2D, StateValidityChecker};
use crate::control_planning::Bounds;

/// SE(2) manifold with bounds on the (x, y) component
#[derive(Debug, Clone)]
pub struct PoseSpace {
    bounds: Bounds,
}

impl PoseSpace {
    pub fn new(bounds: Bounds) -> PlanningResult<Self> {
        if bounds.dimension() != 2 {
            return Err(PlanningError::InvalidBounds(format!(
                "pose space needs 2D position bounds, got dimension {}",
                bounds.dimension()
            )));
        }
        Ok(Self { bounds })
    }

    /// Square workspace `[low, high]^2`
    pub fn square(low: f64, high: f64) -> PlanningResult<Self> {
        Self::new(Bounds::uniform(2, low, high)?)
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// True iff x and y are within the position bounds (inclusive)
    pub fn contains(&self, pose: &Pose2D) -> bool {
        self.bounds.contains(&[pose.x, pose.y])
    }

    pub fn position_distance(&self, a: &Pose2D, b: &Pose2D) -> f64 {
        a.position().distance(&b.position())
    }

    /// Position distance plus wrapped heading difference
    pub fn distance(&self, a: &Pose2D, b: &Pose2D) -> f64 {
        self.position_distance(a, b) + a.yaw_distance(b)
    }

    /// Clamp the position into bounds and wrap the heading
    pub fn enforce_bounds(&self, pose: &Pose2D) -> Pose2D {
        let p = self.bounds.clamp(&[pose.x, pose.y]);
        Pose2D::new(p[0], p[1], normalize_angle(pose.yaw))
    }

    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Pose2D {
        let low = self.bounds.low();
        let high = self.bounds.high();
        Pose2D::new(
            rng.gen_range(low[0]..=high[0]),
            rng.gen_range(low[1]..=high[1]),
            rng.gen_range(-PI..PI),
        )
    }

    /// Gaussian sample around `near`, pulled back into bounds
    pub fn sample_gaussian<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        near: &Pose2D,
        std_dev: f64,
    ) -> PlanningResult<Pose2D> {
        let noise = Normal::new(0.0, std_dev)
            .map_err(|e| PlanningError::InvalidArgument(format!("std_dev {}: {}", std_dev, e)))?;
        let sample = Pose2D::new(
            near.x + noise.sample(rng),
            near.y + noise.sample(rng),
            near.yaw + noise.sample(rng),
        );
        Ok(self.enforce_bounds(&sample))
    }
}

/// Validity predicate that only checks the pose space bounds
#[derive(Debug, Clone)]
pub struct BoundsValidityChecker {
    space: Arc<PoseSpace>,
}

impl BoundsValidityChecker {
    pub fn new(space: Arc<PoseSpace>) -> Self {
        Self { space }
    }
}

impl StateValidityChecker for BoundsValidityChecker {
    fn is_valid(&self, pose: &Pose2D) -> bool {
        self.space.contains(pose)
    }
}
