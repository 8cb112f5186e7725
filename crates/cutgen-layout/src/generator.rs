//! Technology-aware cut array generation
//!
//! Resolves a layer's rules, selects the spacing and plans the array in one
//! call.

use crate::array::{plan, PlacementResult};
use crate::error::Result;
use crate::geometry::Region;
use crate::spacing::{select_spacing, SpacingDecision};
use cutgen_tech::{LayerId, Technology, TechnologyRegistry};
use serde::Serialize;

/// A placed cut array together with the spacing decision behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutArray {
    /// Cut layer
    pub layer: LayerId,
    /// Spacing selection result
    pub decision: SpacingDecision,
    /// Placed cuts
    pub placement: PlacementResult,
}

/// Cut array generator bound to one technology
#[derive(Debug, Clone, Copy)]
pub struct CutArrayGenerator<'a> {
    technology: &'a Technology,
}

impl<'a> CutArrayGenerator<'a> {
    pub fn new(technology: &'a Technology) -> Self {
        CutArrayGenerator { technology }
    }

    /// Look up `name` in `registry`; fails before any placement is attempted
    pub fn from_registry(registry: &'a TechnologyRegistry, name: &str) -> Result<Self> {
        Ok(Self::new(registry.get(name)?))
    }

    pub fn technology(&self) -> &'a Technology {
        self.technology
    }

    /// Place the densest legal array of `layer` cuts inside `region`
    pub fn place(&self, layer: &LayerId, region: &Region) -> Result<CutArray> {
        let rules = self.technology.layer(layer)?;
        region.validate()?;

        let grid = &self.technology.grid;
        let decision = select_spacing(
            layer,
            region.width,
            region.length,
            &rules.cut,
            &rules.spacing,
            grid,
        );
        let placement = plan(
            region,
            rules.cut.cut_size,
            decision.spacing,
            rules.cut.overhang,
            grid,
        )?;
        debug_assert_eq!(
            (placement.rows, placement.columns),
            (decision.rows, decision.columns)
        );

        Ok(CutArray {
            layer: layer.clone(),
            decision,
            placement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use cutgen_tech::TechError;

    #[test]
    fn test_place_contacts() {
        let registry = TechnologyRegistry::builtin();
        let generator = CutArrayGenerator::from_registry(&registry, "sg13").unwrap();
        let array = generator
            .place(&LayerId::new("Cont"), &Region::sized(0.78, 0.78))
            .unwrap();
        assert!(!array.decision.relaxed);
        assert_eq!(array.placement.counts(), (2, 2));
    }

    #[test]
    fn test_large_contact_array_uses_relaxed_spacing() {
        let tech = cutgen_tech::builtin::sg13();
        let generator = CutArrayGenerator::new(&tech);
        let array = generator
            .place(&LayerId::new("Cont"), &Region::sized(2.0, 2.0))
            .unwrap();
        // 6x6 at 0.18 reaches the 4x4 threshold; at 0.20 it is 5x5
        assert!(array.decision.relaxed);
        assert_eq!(array.placement.spacing, 0.20);
        assert_eq!(array.placement.counts(), (5, 5));
    }

    #[test]
    fn test_unknown_technology_fails_at_lookup() {
        let registry = TechnologyRegistry::builtin();
        let err = CutArrayGenerator::from_registry(&registry, "nope").unwrap_err();
        assert!(err.is_unknown_technology());
        assert_eq!(
            err,
            LayoutError::Technology(TechError::UnknownTechnology("nope".to_string()))
        );
    }

    #[test]
    fn test_unknown_layer() {
        let tech = cutgen_tech::builtin::sg13();
        let err = CutArrayGenerator::new(&tech)
            .place(&LayerId::new("Poly"), &Region::sized(1.0, 1.0))
            .unwrap_err();
        assert!(err.is_unknown_technology());
    }

    #[test]
    fn test_too_small_region() {
        let tech = cutgen_tech::builtin::sg13();
        let err = CutArrayGenerator::new(&tech)
            .place(&LayerId::new("Cont"), &Region::sized(0.20, 0.78))
            .unwrap_err();
        assert!(err.is_insufficient_space());
    }
}
