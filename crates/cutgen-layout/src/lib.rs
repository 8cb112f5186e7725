//! Contact and via array placement
//!
//! Computes where to put a dense grid of square cuts inside a rectangular
//! region under fabrication rules:
//! - Grid quantization of coordinates
//! - Density-dependent spacing selection
//! - Cut counts, centering and the realized bounding box
//! - Shape requests for generated devices (diode antenna)
//!
//! Everything here is pure computation over immutable technology data. No
//! shapes are drawn and no files are written.

pub mod antenna;
pub mod array;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod spacing;

pub use antenna::{DiodeAntenna, ShapeRequest, ShapeSet};
pub use array::{plan, PlacementResult};
pub use error::{Axis, LayoutError, Result};
pub use generator::{CutArray, CutArrayGenerator};
pub use geometry::{Point, Rect, Region};
pub use grid::quantize;
pub use spacing::{select_spacing, SpacingDecision};
