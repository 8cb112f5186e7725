//! Error types for technology loading and lookup

use thiserror::Error;

/// Result type for technology operations
pub type Result<T> = std::result::Result<T, TechError>;

/// Errors that can occur while loading or querying technology parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TechError {
    /// I/O error reading a technology file
    #[error("I/O error: {0}")]
    Io(String),

    /// TOML parsing error
    #[error("Failed to parse technology file: {0}")]
    Parse(String),

    /// Requested technology is not registered
    #[error("Unknown technology: {0}")]
    UnknownTechnology(String),

    /// Requested layer has no cut rules in the technology
    #[error("Layer '{layer}' has no cut rules in technology '{technology}'")]
    UnknownLayer { technology: String, layer: String },

    /// A technology with the same name was registered twice
    #[error("Technology '{0}' is defined more than once")]
    DuplicateTechnology(String),

    /// A parameter is out of its legal range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A rule length does not sit on the manufacturing grid
    #[error("Parameter {name} = {value} is not a multiple of the grid pitch {pitch}")]
    OffGrid { name: String, value: f64, pitch: f64 },
}

impl TechError {
    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        TechError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
