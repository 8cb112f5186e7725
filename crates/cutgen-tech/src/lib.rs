//! Technology parameters for cut array placement
//!
//! This crate is the technology parameter provider:
//! - Manufacturing grid (pitch, tolerance)
//! - Per-layer cut size, spacing and edge clearance
//! - Density-dependent spacing rules, resolved once per layer
//! - Diode antenna generator parameters
//!
//! Technologies come from TOML files or the built-in set and are
//! validated when loaded.

pub mod builtin;
pub mod config;
pub mod error;
pub mod registry;
pub mod rules;
pub mod technology;

pub use config::TechnologyFile;
pub use error::{Result, TechError};
pub use registry::TechnologyRegistry;
pub use rules::{CutSpec, GridConfig, LayerId, LayerRules, SpacingRule, SpacingRuleProfile};
pub use technology::{AntennaParams, Technology};

use std::path::Path;

/// Load a technology registry from a file path
pub fn from_path(path: impl AsRef<Path>) -> Result<TechnologyRegistry> {
    TechnologyRegistry::from_path(path)
}

/// Load a technology registry from a TOML string
pub fn from_str(s: &str) -> Result<TechnologyRegistry> {
    TechnologyRegistry::from_toml(s)
}
