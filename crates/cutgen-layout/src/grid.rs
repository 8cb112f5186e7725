//! Manufacturing grid quantization

use cutgen_tech::GridConfig;

/// Snap `value` down to the manufacturing grid
///
/// The epsilon term (in grid steps) keeps a value that is meant to sit on a
/// grid line but carries floating-point error, e.g. `0.07 / 0.005 =
/// 13.999999999999998`, from dropping a whole step.
pub fn quantize(value: f64, grid: &GridConfig) -> f64 {
    (value / grid.pitch + grid.epsilon).floor() * grid.pitch
}

/// Number of whole grid steps in `value`, with the same tolerance as [`quantize`]
pub fn grid_steps(value: f64, grid: &GridConfig) -> i64 {
    (value / grid.pitch + grid.epsilon).floor() as i64
}
