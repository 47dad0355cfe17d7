//! RustKinoplan - kinematic car planning problems in Rust
//!
//! This crate models a car-like vehicle on a bounded plane: the pose
//! space, the control space with its closed-form propagation, and a
//! planning problem that delegates the search for a control sequence to
//! a pluggable capability and verifies the result.

// Core modules
pub mod common;
pub mod utils;

// Planning modules
pub mod control_planning;

// Re-export common types for convenience
pub use common::{Point2D, Pose2D, Path2D, ControlInput};
pub use common::{SearchCapability, SearchReport, SearchRequest, StatePropagator, StateValidityChecker};
pub use common::{PlanningError, PlanningFailure, PlanningResult};
