//! Utility modules for rust_kinoplan

pub mod visualization;

pub use visualization::{Visualizer, PathStyle, PointStyle, colors};
