//! Design rule value types
//!
//! All lengths are in microns. Every value here is immutable once a
//! [`Technology`](crate::Technology) has been resolved and validated.

use crate::error::{Result, TechError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a mask layer (e.g. `Cont`, `Via1`, `Metal1`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(name: impl Into<String>) -> Self {
        LayerId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(name: &str) -> Self {
        LayerId::new(name)
    }
}

impl From<String> for LayerId {
    fn from(name: String) -> Self {
        LayerId(name)
    }
}

/// Manufacturing grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid resolution (microns)
    pub pitch: f64,
    /// Tolerance added before truncating to whole grid steps or cut counts
    pub epsilon: f64,
}

impl GridConfig {
    /// Create a validated grid configuration
    pub fn new(pitch: f64, epsilon: f64) -> Result<Self> {
        let grid = GridConfig { pitch, epsilon };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.pitch.is_finite() || self.pitch <= 0.0 {
            return Err(TechError::invalid(
                "grid.pitch",
                format!("must be a positive finite length, got {}", self.pitch),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 || self.epsilon >= 1.0 {
            return Err(TechError::invalid(
                "grid.epsilon",
                format!("must lie in [0, 1), got {}", self.epsilon),
            ));
        }
        Ok(())
    }

    /// Whether `value` is a whole number of grid steps, within epsilon
    pub fn is_on_grid(&self, value: f64) -> bool {
        let steps = value / self.pitch;
        (steps - steps.round()).abs() <= self.epsilon
    }
}

/// Cut geometry for one cut layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutSpec {
    /// Side length of the square cut
    pub cut_size: f64,
    /// Nominal gap between adjacent cuts
    pub spacing: f64,
    /// Minimum margin between the array and the region edge
    pub overhang: f64,
}

impl CutSpec {
    /// Center-to-center distance at nominal spacing
    pub fn pitch(&self) -> f64 {
        self.cut_size + self.spacing
    }

    /// Smallest region dimension that holds a single cut
    pub fn min_dimension(&self) -> f64 {
        2.0 * self.overhang + self.cut_size
    }
}

/// How a layer's spacing reacts to array density
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpacingRuleProfile {
    /// One spacing regardless of array size
    Flat { spacing: f64 },
    /// Larger spacing once both counts reach the thresholds
    DensitySwitch {
        default_spacing: f64,
        relaxed_spacing: f64,
        threshold_rows: u32,
        threshold_cols: u32,
    },
}

impl SpacingRuleProfile {
    pub fn default_spacing(&self) -> f64 {
        match *self {
            SpacingRuleProfile::Flat { spacing } => spacing,
            SpacingRuleProfile::DensitySwitch {
                default_spacing, ..
            } => default_spacing,
        }
    }

    pub fn relaxed_spacing(&self) -> Option<f64> {
        match *self {
            SpacingRuleProfile::Flat { .. } => None,
            SpacingRuleProfile::DensitySwitch {
                relaxed_spacing, ..
            } => Some(relaxed_spacing),
        }
    }
}

/// Spacing rule bound to the layer it was resolved for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingRule {
    pub layer: LayerId,
    pub profile: SpacingRuleProfile,
}

impl SpacingRule {
    pub fn flat(layer: impl Into<LayerId>, spacing: f64) -> Self {
        SpacingRule {
            layer: layer.into(),
            profile: SpacingRuleProfile::Flat { spacing },
        }
    }

    pub fn density_switch(
        layer: impl Into<LayerId>,
        default_spacing: f64,
        relaxed_spacing: f64,
        threshold_rows: u32,
        threshold_cols: u32,
    ) -> Self {
        SpacingRule {
            layer: layer.into(),
            profile: SpacingRuleProfile::DensitySwitch {
                default_spacing,
                relaxed_spacing,
                threshold_rows,
                threshold_cols,
            },
        }
    }

    /// Whether the density switch can fire for `layer`
    pub fn applies_to_layer(&self, layer: &LayerId) -> bool {
        self.layer == *layer && matches!(self.profile, SpacingRuleProfile::DensitySwitch { .. })
    }

    pub fn default_spacing(&self) -> f64 {
        self.profile.default_spacing()
    }

    pub fn relaxed_spacing(&self) -> Option<f64> {
        self.profile.relaxed_spacing()
    }

    /// `(rows, cols)` thresholds, if this is a density switch
    pub fn thresholds(&self) -> Option<(u32, u32)> {
        match self.profile {
            SpacingRuleProfile::Flat { .. } => None,
            SpacingRuleProfile::DensitySwitch {
                threshold_rows,
                threshold_cols,
                ..
            } => Some((threshold_rows, threshold_cols)),
        }
    }
}

/// Complete cut rules for one layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRules {
    pub cut: CutSpec,
    pub spacing: SpacingRule,
}

impl LayerRules {
    pub fn layer(&self) -> &LayerId {
        &self.spacing.layer
    }

    /// Check positivity, finiteness and grid alignment of every length
    pub fn validate(&self, grid: &GridConfig) -> Result<()> {
        let layer = self.layer();
        let mut lengths = vec![
            ("cut_size", self.cut.cut_size),
            ("spacing", self.cut.spacing),
            ("overhang", self.cut.overhang),
        ];
        if let Some(relaxed) = self.spacing.relaxed_spacing() {
            lengths.push(("density.relaxed_spacing", relaxed));
        }

        for (field, value) in lengths {
            let name = format!("{}.{}", layer, field);
            if !value.is_finite() || value <= 0.0 {
                return Err(TechError::invalid(
                    name,
                    format!("must be a positive finite length, got {}", value),
                ));
            }
            if !grid.is_on_grid(value) {
                return Err(TechError::OffGrid {
                    name,
                    value,
                    pitch: grid.pitch,
                });
            }
        }

        if (self.spacing.default_spacing() - self.cut.spacing).abs() > f64::EPSILON {
            return Err(TechError::invalid(
                format!("{}.spacing", layer),
                "spacing rule and cut spec disagree on the default spacing",
            ));
        }

        if let Some(relaxed) = self.spacing.relaxed_spacing() {
            if relaxed < self.cut.spacing {
                return Err(TechError::invalid(
                    format!("{}.density.relaxed_spacing", layer),
                    format!(
                        "relaxed spacing {} is smaller than the default spacing {}",
                        relaxed, self.cut.spacing
                    ),
                ));
            }
        }

        if let Some((rows, cols)) = self.spacing.thresholds() {
            if rows == 0 || cols == 0 {
                return Err(TechError::invalid(
                    format!("{}.density", layer),
                    "thresholds must be at least 1",
                ));
            }
        }

        Ok(())
    }
}
