//! Kinematic Car Planning Module
//!
//! This module sets up planning problems for a car-like vehicle that is
//! driven by a forward speed and a turn rate. The search for a control
//! sequence itself is delegated to a [`SearchCapability`](crate::common::SearchCapability);
//! this module owns the spaces, the propagation law and the checks around
//! the search.
//!
//! # Components
//!
//! - `bounds`: Axis-aligned real vector bounds
//! - `pose_space`: Bounded SE(2) pose space and its bounds-only validity checker
//! - `control_model`: Bounded `(v, omega)` control space and kinematic propagation
//! - `control_path`: Control sequences and their geometric rendering
//! - `problem`: Planning problem with precondition checks and solution verification
//! - `steering`: Deterministic turn-and-drive capability
//! - `config`: TOML-loadable problem configuration
//!
//! # Example
//!
//! ```no_run
//! use rust_kinoplan::control_planning::{PlanningConfig, TurnAndDrive};
//!
//! let config = PlanningConfig::default();
//! let problem = config.build_problem().unwrap();
//! let mut steering = TurnAndDrive::new(config.steering());
//!
//! match problem.solve(&mut steering, config.time_budget).unwrap() {
//!     Ok(path) => println!("Found solution:\n{}", path),
//!     Err(failure) => println!("{}", failure),
//! }
//! ```

pub mod bounds;
pub mod pose_space;
pub mod control_model;
pub mod control_path;
pub mod problem;
pub mod steering;
pub mod config;

// Re-exports
pub use bounds::Bounds;
pub use pose_space::{BoundsValidityChecker, PoseSpace};
pub use control_model::ControlModel;
pub use control_path::{format_poses, ControlPath, ControlStep};
pub use problem::{PlanningOutcome, PlanningProblem};
pub use steering::{SteeringConfig, TurnAndDrive};
pub use config::{BoundsConfig, PlanningConfig, PoseConfig, MIN_STEP_DURATION};
