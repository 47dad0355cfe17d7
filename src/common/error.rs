//! Error types for rust_kinoplan

use std::fmt;

/// Main error type for planning problem setup and propagation
#[derive(Debug)]
pub enum PlanningError {
    /// Bounds with low > high, NaN entries or the wrong dimension
    InvalidBounds(String),
    /// Invalid argument to a pure operation (e.g. negative duration)
    InvalidArgument(String),
    /// Planning problem rejected before any search was attempted
    InvalidProblem {
        field: &'static str,
        reason: String,
    },
    /// Configuration could not be parsed
    ConfigError(String),
    /// I/O error
    IoError(std::io::Error),
    /// Visualization error
    VisualizationError(String),
}

impl fmt::Display for PlanningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanningError::InvalidBounds(msg) => write!(f, "Invalid bounds: {}", msg),
            PlanningError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PlanningError::InvalidProblem { field, reason } => {
                write!(f, "Invalid problem ({}): {}", field, reason)
            }
            PlanningError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            PlanningError::IoError(e) => write!(f, "I/O error: {}", e),
            PlanningError::VisualizationError(msg) => write!(f, "Visualization error: {}", msg),
        }
    }
}

impl std::error::Error for PlanningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanningError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlanningError {
    fn from(e: std::io::Error) -> Self {
        PlanningError::IoError(e)
    }
}

impl From<toml::de::Error> for PlanningError {
    fn from(e: toml::de::Error) -> Self {
        PlanningError::ConfigError(e.to_string())
    }
}

impl PlanningError {
    pub(crate) fn invalid_problem(field: &'static str, reason: impl Into<String>) -> Self {
        PlanningError::InvalidProblem {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending problem field, if this is an `InvalidProblem`
    pub fn problem_field(&self) -> Option<&'static str> {
        match self {
            PlanningError::InvalidProblem { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Expected, non-exceptional reasons a well-formed problem produced no plan
#[derive(Debug, Clone, PartialEq)]
pub enum PlanningFailure {
    /// The search capability reported no solution within the time budget
    NotFound,
    /// The search capability reported success but its steps do not reach the
    /// goal through valid poses
    InvalidSolution(String),
}

impl fmt::Display for PlanningFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanningFailure::NotFound => write!(f, "No solution found"),
            PlanningFailure::InvalidSolution(msg) => write!(f, "Rejected solution: {}", msg),
        }
    }
}
