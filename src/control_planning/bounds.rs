//! Axis-aligned real vector bounds shared by the pose and control spaces

use nalgebra::DVector;

use crate::common::{PlanningError, PlanningResult};

/// Inclusive `[low, high]` box in R^n.
///
/// Invariant: `low.len() == high.len()` and `low[i] <= high[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    low: DVector<f64>,
    high: DVector<f64>,
}

impl Bounds {
    pub fn new(low: DVector<f64>, high: DVector<f64>) -> PlanningResult<Self> {
        if low.len() != high.len() {
            return Err(PlanningError::InvalidBounds(format!(
                "low has dimension {} but high has dimension {}",
                low.len(),
                high.len()
            )));
        }
        for (i, (l, h)) in low.iter().zip(high.iter()).enumerate() {
            if l.is_nan() || h.is_nan() {
                return Err(PlanningError::InvalidBounds(format!("NaN bound in dimension {}", i)));
            }
            if l > h {
                return Err(PlanningError::InvalidBounds(format!(
                    "low[{}] = {} exceeds high[{}] = {}",
                    i, l, i, h
                )));
            }
        }
        Ok(Self { low, high })
    }

    pub fn from_slices(low: &[f64], high: &[f64]) -> PlanningResult<Self> {
        Self::new(DVector::from_column_slice(low), DVector::from_column_slice(high))
    }

    /// Same `[low, high]` interval in every dimension
    pub fn uniform(dim: usize, low: f64, high: f64) -> PlanningResult<Self> {
        Self::new(DVector::from_element(dim, low), DVector::from_element(dim, high))
    }

    pub fn dimension(&self) -> usize {
        self.low.len()
    }

    pub fn low(&self) -> &DVector<f64> {
        &self.low
    }

    pub fn high(&self) -> &DVector<f64> {
        &self.high
    }

    /// Inclusive containment; `values` must have the bounds' dimension
    pub fn contains(&self, values: &[f64]) -> bool {
        values.len() == self.dimension()
            && values
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(v, (l, h))| *v >= *l && *v <= *h)
    }

    /// Clamp each component into its interval
    pub fn clamp(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .map(|(v, (l, h))| v.max(*l).min(*h))
            .collect()
    }

    /// Per-dimension extent `high - low`
    pub fn difference(&self) -> DVector<f64> {
        &self.high - &self.low
    }

    pub fn volume(&self) -> f64 {
        self.difference().iter().product()
    }
}
