//! Diode antenna shape requests
//!
//! A diode antenna is a diffusion rectangle filled with a contact array,
//! covered by a metal rectangle over the realized contacts, optionally
//! marked with a recognition layer and always labeled. This module only
//! computes the shapes; rendering them is left to the layout engine.

use crate::error::{LayoutError, Result};
use crate::generator::{CutArray, CutArrayGenerator};
use crate::geometry::{Point, Rect, Region};
use cutgen_tech::{LayerId, Technology};
use serde::Serialize;

/// One drawable primitive for the layout engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeRequest {
    /// A single contact cut
    Cut { layer: LayerId, rect: Rect },
    /// Conductor covering the placed cuts
    Enclosure { layer: LayerId, rect: Rect },
    /// Base diffusion region
    Region { layer: LayerId, rect: Rect },
    /// Recognition marker around the device
    Recognition { layer: LayerId, rect: Rect },
    /// Text label
    Label {
        layer: LayerId,
        text: String,
        position: Point,
    },
}

impl ShapeRequest {
    pub fn layer(&self) -> &LayerId {
        match self {
            ShapeRequest::Cut { layer, .. }
            | ShapeRequest::Enclosure { layer, .. }
            | ShapeRequest::Region { layer, .. }
            | ShapeRequest::Recognition { layer, .. }
            | ShapeRequest::Label { layer, .. } => layer,
        }
    }

    /// Rectangle of the shape, if it has one
    pub fn rect(&self) -> Option<&Rect> {
        match self {
            ShapeRequest::Cut { rect, .. }
            | ShapeRequest::Enclosure { rect, .. }
            | ShapeRequest::Region { rect, .. }
            | ShapeRequest::Recognition { rect, .. } => Some(rect),
            ShapeRequest::Label { .. } => None,
        }
    }
}

/// Shapes making up one generated device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSet {
    /// Device name
    pub name: String,
    /// The contact array the shapes were derived from
    pub array: CutArray,
    /// Shapes in drawing order
    pub shapes: Vec<ShapeRequest>,
}

impl ShapeSet {
    pub fn on_layer<'a>(&'a self, layer: &'a LayerId) -> impl Iterator<Item = &'a ShapeRequest> {
        self.shapes.iter().filter(move |shape| shape.layer() == layer)
    }

    pub fn recognition(&self) -> Option<&Rect> {
        self.shapes.iter().find_map(|shape| match shape {
            ShapeRequest::Recognition { rect, .. } => Some(rect),
            _ => None,
        })
    }

    pub fn enclosure(&self) -> Option<&Rect> {
        self.shapes.iter().find_map(|shape| match shape {
            ShapeRequest::Enclosure { rect, .. } => Some(rect),
            _ => None,
        })
    }
}

/// Diode antenna parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiodeAntenna {
    /// Diffusion width (microns)
    pub width: f64,
    /// Diffusion length (microns)
    pub length: f64,
    /// Add the diode recognition rectangle
    pub add_recognition: bool,
}

impl Default for DiodeAntenna {
    fn default() -> Self {
        DiodeAntenna {
            width: 0.78,
            length: 0.78,
            add_recognition: true,
        }
    }
}

impl DiodeAntenna {
    pub fn new(width: f64, length: f64) -> Self {
        DiodeAntenna {
            width,
            length,
            ..Default::default()
        }
    }

    pub fn with_recognition(mut self, add_recognition: bool) -> Self {
        self.add_recognition = add_recognition;
        self
    }

    /// Compute the shape requests for this antenna in `technology`
    pub fn build(&self, technology: &Technology) -> Result<ShapeSet> {
        let params = &technology.antenna;
        let region = Region::sized(self.width, self.length);
        region.validate()?;
        if self.width < params.min_width || self.length < params.min_length {
            return Err(LayoutError::InvalidRegion(format!(
                "antenna {}x{} is below the minimum {}x{}",
                self.width, self.length, params.min_width, params.min_length
            )));
        }

        let array = CutArrayGenerator::new(technology).place(&params.cut_layer, &region)?;

        let mut shapes = Vec::with_capacity(array.placement.len() + 4);
        shapes.extend(array.placement.cut_rects().map(|rect| ShapeRequest::Cut {
            layer: params.cut_layer.clone(),
            rect,
        }));
        shapes.push(ShapeRequest::Enclosure {
            layer: params.connect_layer.clone(),
            rect: array.placement.enclosure(),
        });
        shapes.push(ShapeRequest::Region {
            layer: params.active_layer.clone(),
            rect: region.rect(),
        });
        shapes.push(ShapeRequest::Label {
            layer: params.text_layer.clone(),
            text: params.label.clone(),
            position: region.rect().center(),
        });
        if self.add_recognition {
            shapes.push(ShapeRequest::Recognition {
                layer: params.recognition_layer.clone(),
                rect: region.rect().expand(params.recognition_overage),
            });
        }

        log::debug!(
            "Diode antenna {}x{}: {} cuts, {} shapes",
            self.width,
            self.length,
            array.placement.len(),
            shapes.len()
        );

        Ok(ShapeSet {
            name: params.label.clone(),
            array,
            shapes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutgen_tech::builtin;

    #[test]
    fn test_default_antenna_shapes() {
        let tech = builtin::sg13();
        let set = DiodeAntenna::default().build(&tech).unwrap();

        let cont = LayerId::new("Cont");
        assert_eq!(set.on_layer(&cont).count(), 4);
        // 4 cuts + enclosure + region + label + recognition
        assert_eq!(set.shapes.len(), 8);

        let enclosure = set.enclosure().unwrap();
        assert_eq!(*enclosure, set.array.placement.bbox);
        assert!((enclosure.x1 - 0.14).abs() < 1e-9);
        assert!((enclosure.x2 - 0.64).abs() < 1e-9);
    }

    #[test]
    fn test_recognition_is_optional() {
        let tech = builtin::sg13();
        let set = DiodeAntenna::default()
            .with_recognition(false)
            .build(&tech)
            .unwrap();
        assert!(set.recognition().is_none());
        assert_eq!(set.shapes.len(), 7);
    }

    #[test]
    fn test_recognition_overage() {
        let mut tech = builtin::sg13();
        tech.antenna.recognition_overage = 0.1;
        let set = DiodeAntenna::new(1.0, 0.5).build(&tech).unwrap();
        let rect = set.recognition().unwrap();
        assert!((rect.x1 + 0.1).abs() < 1e-9);
        assert!((rect.y1 + 0.1).abs() < 1e-9);
        assert!((rect.width() - 1.2).abs() < 1e-9);
        assert!((rect.height() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_label_at_region_center() {
        let tech = builtin::sg13();
        let set = DiodeAntenna::new(1.0, 0.5).build(&tech).unwrap();
        let label = set
            .shapes
            .iter()
            .find_map(|shape| match shape {
                ShapeRequest::Label { text, position, .. } => Some((text.clone(), *position)),
                _ => None,
            })
            .unwrap();
        assert_eq!(label.0, "dant");
        assert_eq!(label.1, Point::new(0.5, 0.25));
    }

    #[test]
    fn test_below_minimum_is_rejected() {
        let tech = builtin::sg13();
        let err = DiodeAntenna::new(0.2, 0.78).build(&tech).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidRegion(_)));
    }
}
