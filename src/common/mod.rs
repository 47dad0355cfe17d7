//! Common types, traits, and error definitions for rust_kinoplan
//!
//! This module provides the value types, capability traits and error
//! types shared by the planning problem and its collaborators.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
