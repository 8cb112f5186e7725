//! Technology file structure definitions
//!
//! A technology file is TOML holding one or more `[[technology]]` tables:
//!
//! ```toml
//! [[technology]]
//! name = "sg13"
//!
//! [technology.grid]
//! pitch = 0.005
//! epsilon = 0.001
//!
//! [[technology.layer]]
//! name = "Cont"
//! cut_size = 0.16
//! spacing = 0.18
//! overhang = 0.07
//! density = { threshold_rows = 4, threshold_cols = 4, relaxed_spacing = 0.20 }
//!
//! [technology.antenna]
//! cut_layer = "Cont"
//! ```

use crate::error::Result;
use crate::rules::{CutSpec, GridConfig, LayerId, LayerRules, SpacingRule};
use crate::technology::{AntennaParams, Technology};
use serde::{Deserialize, Serialize};

/// Complete technology file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnologyFile {
    /// Technologies defined in this file
    #[serde(default)]
    pub technology: Vec<TechnologyConfig>,
}

/// One technology as written in the file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyConfig {
    /// Technology / library name
    pub name: String,

    /// Manufacturing grid
    pub grid: GridSection,

    /// Cut layers
    #[serde(default, rename = "layer")]
    pub layers: Vec<LayerSection>,

    /// Diode antenna parameters
    pub antenna: AntennaSection,
}

/// Manufacturing grid section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSection {
    /// Grid resolution (microns)
    pub pitch: f64,

    /// Tolerance in grid steps
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_epsilon() -> f64 {
    0.001
}

/// Cut rules for a single layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSection {
    /// Cut layer name
    pub name: String,
    /// Cut side length
    pub cut_size: f64,
    /// Nominal cut-to-cut gap
    pub spacing: f64,
    /// Region edge clearance
    pub overhang: f64,
    /// Optional density-dependent spacing
    #[serde(default)]
    pub density: Option<DensitySection>,
}

/// Density switch parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensitySection {
    pub threshold_rows: u32,
    pub threshold_cols: u32,
    pub relaxed_spacing: f64,
}

/// Diode antenna section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntennaSection {
    pub cut_layer: String,
    #[serde(default = "default_connect_layer")]
    pub connect_layer: String,
    #[serde(default = "default_active_layer")]
    pub active_layer: String,
    #[serde(default = "default_recognition_layer")]
    pub recognition_layer: String,
    #[serde(default = "default_text_layer")]
    pub text_layer: String,
    #[serde(default)]
    pub recognition_overage: f64,
    #[serde(default = "default_label")]
    pub label: String,
    /// Defaults to the smallest region holding one cut
    #[serde(default)]
    pub min_width: Option<f64>,
    #[serde(default)]
    pub min_length: Option<f64>,
}

fn default_connect_layer() -> String {
    "Metal1".to_string()
}

fn default_active_layer() -> String {
    "Activ".to_string()
}

fn default_recognition_layer() -> String {
    "Recog.diode".to_string()
}

fn default_text_layer() -> String {
    "TEXT".to_string()
}

fn default_label() -> String {
    "dant".to_string()
}

impl LayerSection {
    /// Resolve the optional density table into a spacing profile
    fn resolve(&self) -> LayerRules {
        let spacing = match &self.density {
            Some(density) => SpacingRule::density_switch(
                self.name.as_str(),
                self.spacing,
                density.relaxed_spacing,
                density.threshold_rows,
                density.threshold_cols,
            ),
            None => SpacingRule::flat(self.name.as_str(), self.spacing),
        };

        LayerRules {
            cut: CutSpec {
                cut_size: self.cut_size,
                spacing: self.spacing,
                overhang: self.overhang,
            },
            spacing,
        }
    }
}

impl TechnologyConfig {
    /// Resolve and validate into an immutable [`Technology`]
    pub fn resolve(&self) -> Result<Technology> {
        let grid = GridConfig::new(self.grid.pitch, self.grid.epsilon)?;
        let layers: Vec<LayerRules> = self.layers.iter().map(LayerSection::resolve).collect();

        let cut_layer = LayerId::new(self.antenna.cut_layer.as_str());
        let single_cut = layers
            .iter()
            .find(|rules| *rules.layer() == cut_layer)
            .map(|rules| rules.cut.min_dimension())
            .unwrap_or(0.0);

        let antenna = AntennaParams {
            cut_layer,
            connect_layer: LayerId::new(self.antenna.connect_layer.as_str()),
            active_layer: LayerId::new(self.antenna.active_layer.as_str()),
            recognition_layer: LayerId::new(self.antenna.recognition_layer.as_str()),
            text_layer: LayerId::new(self.antenna.text_layer.as_str()),
            recognition_overage: self.antenna.recognition_overage,
            label: self.antenna.label.clone(),
            min_width: self.antenna.min_width.unwrap_or(single_cut),
            min_length: self.antenna.min_length.unwrap_or(single_cut),
        };

        let technology = Technology::new(self.name.clone(), grid, layers, antenna)?;
        log::debug!(
            "Resolved technology {} with {} cut layer(s)",
            technology.name,
            technology.layers.len()
        );
        Ok(technology)
    }
}
