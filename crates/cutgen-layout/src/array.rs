//! Cut array planning
//!
//! Places the densest grid of square cuts that fits inside a region while
//! keeping the edge clearance, then centers the array on the manufacturing
//! grid.

use crate::error::{Axis, LayoutError, Result};
use crate::geometry::{Point, Rect, Region};
use crate::grid::quantize;
use cutgen_tech::GridConfig;
use serde::Serialize;

/// Upper bound on the number of cuts in one planned array
pub const MAX_CUTS: usize = 1 << 24;

/// Maximum number of cuts at pitch `cut_size + spacing` along one axis
///
/// `floor((dimension - 2*overhang + spacing + epsilon) / (cut_size + spacing))`,
/// clamped to zero when not even one cut fits. Saturates at `usize::MAX`.
pub fn axis_count(dimension: f64, cut_size: f64, spacing: f64, overhang: f64, epsilon: f64) -> usize {
    let count = ((dimension - 2.0 * overhang + spacing + epsilon) / (cut_size + spacing)).floor();
    if count.is_nan() || count <= 0.0 {
        0
    } else {
        count as usize
    }
}

/// Length covered by `count` cuts plus the clearance on both sides
pub fn occupied_span(count: usize, cut_size: f64, spacing: f64, overhang: f64) -> f64 {
    count as f64 * (cut_size + spacing) - spacing + 2.0 * overhang
}

/// A planned cut array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementResult {
    /// Side length of every cut
    pub cut_size: f64,
    /// Gap between adjacent cuts
    pub spacing: f64,
    /// Cuts along y
    pub rows: usize,
    /// Cuts along x
    pub columns: usize,
    /// Centering offset applied on each axis
    pub offset: Point,
    /// Lower-left corner of every cut, row by row from the bottom
    pub cuts: Vec<Point>,
    /// Realized extent of the cuts
    pub bbox: Rect,
}

impl PlacementResult {
    /// `(rows, columns)`
    pub fn counts(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Center-to-center distance between adjacent cuts
    pub fn pitch(&self) -> f64 {
        self.cut_size + self.spacing
    }

    /// Origin of the cut in `row`, `column`
    pub fn cut(&self, row: usize, column: usize) -> Option<Point> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cuts.get(row * self.columns + column).copied()
    }

    pub fn cut_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.cuts
            .iter()
            .map(|origin| Rect::from_origin(*origin, self.cut_size, self.cut_size))
    }

    /// Rectangle a connecting layer must cover to enclose every cut
    ///
    /// This is the realized bounding box, not the region the array was
    /// planned in.
    pub fn enclosure(&self) -> Rect {
        self.bbox
    }
}

fn check_rule(name: &str, value: f64, grid: &GridConfig) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LayoutError::InvalidRegion(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    check_on_grid(name, value, grid)
}

fn check_on_grid(name: &str, value: f64, grid: &GridConfig) -> Result<()> {
    if !grid.is_on_grid(value) {
        return Err(LayoutError::InvalidRegion(format!(
            "{} {} is not a multiple of the grid pitch {}",
            name, value, grid.pitch
        )));
    }
    Ok(())
}

/// Plan a cut array inside `region`
///
/// Every length, the region origin included, must sit on the manufacturing
/// grid. Fails with [`LayoutError::InvalidRegion`] for non-positive or
/// off-grid inputs and for arrays above [`MAX_CUTS`], and with
/// [`LayoutError::InsufficientSpace`] when not even one cut fits on an axis.
pub fn plan(
    region: &Region,
    cut_size: f64,
    spacing: f64,
    overhang: f64,
    grid: &GridConfig,
) -> Result<PlacementResult> {
    region.validate()?;
    check_on_grid("region x", region.origin.x, grid)?;
    check_on_grid("region y", region.origin.y, grid)?;
    check_on_grid("region width", region.width, grid)?;
    check_on_grid("region length", region.length, grid)?;
    check_rule("cut size", cut_size, grid)?;
    check_rule("spacing", spacing, grid)?;
    check_rule("overhang", overhang, grid)?;

    let columns = axis_count(region.width, cut_size, spacing, overhang, grid.epsilon);
    let rows = axis_count(region.length, cut_size, spacing, overhang, grid.epsilon);

    let required = 2.0 * overhang + cut_size;
    for (axis, count, dimension) in [(Axis::X, columns, region.width), (Axis::Y, rows, region.length)]
    {
        if count == 0 {
            return Err(LayoutError::InsufficientSpace {
                axis,
                dimension,
                required,
            });
        }
    }

    let total = rows
        .checked_mul(columns)
        .filter(|total| *total <= MAX_CUTS)
        .ok_or_else(|| {
            LayoutError::InvalidRegion(format!(
                "{}x{} region needs more than {} cuts",
                region.width, region.length, MAX_CUTS
            ))
        })?;

    let span_x = occupied_span(columns, cut_size, spacing, overhang);
    let span_y = occupied_span(rows, cut_size, spacing, overhang);

    // The count tolerance must never let the array eat into the clearance
    let tolerance = grid.epsilon * grid.pitch;
    for (axis, span, dimension) in [(Axis::X, span_x, region.width), (Axis::Y, span_y, region.length)]
    {
        if span > dimension + tolerance {
            return Err(LayoutError::InsufficientSpace {
                axis,
                dimension,
                required: span,
            });
        }
    }

    let offset = Point::new(
        quantize((region.width - span_x) / 2.0, grid),
        quantize((region.length - span_y) / 2.0, grid),
    );

    let pitch = cut_size + spacing;
    let start = Point::new(
        region.origin.x + offset.x + overhang,
        region.origin.y + offset.y + overhang,
    );

    let mut cuts = Vec::with_capacity(total);
    for row in 0..rows {
        for column in 0..columns {
            cuts.push(Point::new(
                start.x + pitch * column as f64,
                start.y + pitch * row as f64,
            ));
        }
    }

    let bbox = Rect::new(
        start.x,
        start.y,
        start.x + pitch * (columns - 1) as f64 + cut_size,
        start.y + pitch * (rows - 1) as f64 + cut_size,
    );

    log::debug!(
        "Planned {}x{} cuts (pitch {}) in {}x{} region, offset ({}, {})",
        rows,
        columns,
        pitch,
        region.width,
        region.length,
        offset.x,
        offset.y
    );
    log::trace!(
        "Cut bbox ({}, {}) - ({}, {})",
        bbox.x1,
        bbox.y1,
        bbox.x2,
        bbox.y2
    );

    Ok(PlacementResult {
        cut_size,
        spacing,
        rows,
        columns,
        offset,
        cuts,
        bbox,
    })
}
