//! Resolved technology records

use crate::error::{Result, TechError};
use crate::rules::{GridConfig, LayerId, LayerRules};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A validated technology: grid, per-layer cut rules and antenna parameters
///
/// Values are never mutated after construction; share them by reference
/// (or behind an `Arc`) across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    /// Technology / library name
    pub name: String,
    /// Manufacturing grid
    pub grid: GridConfig,
    /// Cut rules keyed by cut layer
    pub layers: IndexMap<LayerId, LayerRules>,
    /// Diode antenna generator parameters
    pub antenna: AntennaParams,
}

/// Layers and rules used by the diode antenna generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaParams {
    /// Cut layer of the contact array
    pub cut_layer: LayerId,
    /// Conductor enclosing the contacts
    pub connect_layer: LayerId,
    /// Diffusion region the contacts land on
    pub active_layer: LayerId,
    /// Diode recognition layer
    pub recognition_layer: LayerId,
    /// Text layer for the device label
    pub text_layer: LayerId,
    /// Outward expansion of the recognition rectangle
    pub recognition_overage: f64,
    /// Label text
    pub label: String,
    /// Minimum diffusion width
    pub min_width: f64,
    /// Minimum diffusion length
    pub min_length: f64,
}

impl Technology {
    /// Build a technology and validate every rule against its grid
    pub fn new(
        name: impl Into<String>,
        grid: GridConfig,
        layers: impl IntoIterator<Item = LayerRules>,
        antenna: AntennaParams,
    ) -> Result<Self> {
        let name = name.into();
        let mut by_layer = IndexMap::new();
        for rules in layers {
            let layer = rules.layer().clone();
            if by_layer.insert(layer.clone(), rules).is_some() {
                return Err(TechError::invalid(
                    format!("{}.layer", name),
                    format!("layer '{}' is defined more than once", layer),
                ));
            }
        }

        let technology = Technology {
            name,
            grid,
            layers: by_layer,
            antenna,
        };
        technology.validate()?;
        Ok(technology)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TechError::invalid("name", "technology name is empty"));
        }
        self.grid.validate()?;
        for rules in self.layers.values() {
            rules.validate(&self.grid)?;
        }
        self.validate_antenna()
    }

    fn validate_antenna(&self) -> Result<()> {
        let antenna = &self.antenna;
        if !self.layers.contains_key(&antenna.cut_layer) {
            return Err(self.unknown_layer(&antenna.cut_layer));
        }
        if !antenna.recognition_overage.is_finite() || antenna.recognition_overage < 0.0 {
            return Err(TechError::invalid(
                "antenna.recognition_overage",
                format!("must be a non-negative length, got {}", antenna.recognition_overage),
            ));
        }
        for (field, value) in [
            ("antenna.min_width", antenna.min_width),
            ("antenna.min_length", antenna.min_length),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TechError::invalid(
                    field,
                    format!("must be a positive finite length, got {}", value),
                ));
            }
        }
        Ok(())
    }

    /// Look up the cut rules of `layer`
    pub fn layer(&self, layer: &LayerId) -> Result<&LayerRules> {
        self.layers
            .get(layer)
            .ok_or_else(|| self.unknown_layer(layer))
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &LayerId> {
        self.layers.keys()
    }

    fn unknown_layer(&self, layer: &LayerId) -> TechError {
        TechError::UnknownLayer {
            technology: self.name.clone(),
            layer: layer.to_string(),
        }
    }
}
