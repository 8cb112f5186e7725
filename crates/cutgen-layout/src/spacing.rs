//! Density-dependent spacing selection
//!
//! Large contact arrays need a wider gap than small ones. The count is first
//! computed at the nominal spacing; if the layer carries a density switch and
//! both counts reach its thresholds, the relaxed spacing is used and the
//! counts are recomputed once. The recomputed counts are not checked against
//! the thresholds again.

use crate::array::axis_count;
use cutgen_tech::{CutSpec, GridConfig, LayerId, SpacingRule};
use serde::Serialize;

/// Spacing chosen for an array and the counts it yields
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpacingDecision {
    /// Gap between adjacent cuts
    pub spacing: f64,
    /// Cuts along y (length)
    pub rows: usize,
    /// Cuts along x (width)
    pub columns: usize,
    /// Whether the density switch fired
    pub relaxed: bool,
}

/// Pick the effective spacing for a `width` x `length` region on `layer`
///
/// Counts are zero when the region is too small; the planner turns those into
/// [`LayoutError::InsufficientSpace`](crate::LayoutError).
pub fn select_spacing(
    layer: &LayerId,
    width: f64,
    length: f64,
    cut: &CutSpec,
    rule: &SpacingRule,
    grid: &GridConfig,
) -> SpacingDecision {
    let counts = |spacing: f64| {
        (
            axis_count(length, cut.cut_size, spacing, cut.overhang, grid.epsilon),
            axis_count(width, cut.cut_size, spacing, cut.overhang, grid.epsilon),
        )
    };

    let (rows, columns) = counts(cut.spacing);
    let nominal = SpacingDecision {
        spacing: cut.spacing,
        rows,
        columns,
        relaxed: false,
    };

    if !rule.applies_to_layer(layer) {
        return nominal;
    }
    let (Some((threshold_rows, threshold_cols)), Some(relaxed_spacing)) =
        (rule.thresholds(), rule.relaxed_spacing())
    else {
        return nominal;
    };

    if rows < threshold_rows as usize || columns < threshold_cols as usize {
        return nominal;
    }

    let (rows, columns) = counts(relaxed_spacing);
    log::debug!(
        "{}: {}x{} array reaches density threshold {}x{}, spacing {} -> {} gives {}x{}",
        layer,
        nominal.rows,
        nominal.columns,
        threshold_rows,
        threshold_cols,
        cut.spacing,
        relaxed_spacing,
        rows,
        columns
    );

    SpacingDecision {
        spacing: relaxed_spacing,
        rows,
        columns,
        relaxed: true,
    }
}
