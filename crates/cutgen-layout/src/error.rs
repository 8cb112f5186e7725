//! Error types for cut array planning

use cutgen_tech::TechError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Placement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    /// Along the region width; counts columns
    X,
    /// Along the region length; counts rows
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Errors that can occur while planning a cut array
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Non-positive or non-finite region or rule dimension
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// Not even a single cut fits along an axis
    #[error(
        "Insufficient space along {axis}: dimension {dimension} is smaller than the {required} needed for one cut"
    )]
    InsufficientSpace {
        axis: Axis,
        dimension: f64,
        required: f64,
    },

    /// Technology or layer lookup failed
    #[error(transparent)]
    Technology(#[from] TechError),
}

impl LayoutError {
    /// Whether not even one cut fits along some axis
    pub fn is_insufficient_space(&self) -> bool {
        matches!(self, LayoutError::InsufficientSpace { .. })
    }

    /// Whether the technology or the cut layer could not be found
    pub fn is_unknown_technology(&self) -> bool {
        matches!(
            self,
            LayoutError::Technology(TechError::UnknownTechnology(_))
                | LayoutError::Technology(TechError::UnknownLayer { .. })
        )
    }
}
