use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Lower bound of the accepted sea pressure window (dbar).
pub const PRESSURE_MIN_DBAR: f64 = -1.5;
/// Upper bound of the accepted sea pressure window (dbar).
pub const PRESSURE_MAX_DBAR: f64 = 12_000.0;

/// Legacy blank-fill magnitudes used for SP and pressure.
pub const SALINITY_PRESSURE_FILL: [f64; 4] = [99_999.0, -99_999.0, 999_999.0, -999_999.0];
/// Legacy blank-fill magnitudes used for longitude and latitude.
pub const POSITION_FILL: [f64; 4] = [9_999.0, -9_999.0, 99_999.0, -99_999.0];

/// Evaluation settings shared by every derived-property call.
///
/// The defaults reproduce TEOS-10 behaviour; most callers never construct
/// anything but `Settings::default()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lowest accepted sea pressure (dbar).
    pub pressure_min: f64,
    /// Highest accepted sea pressure (dbar).
    pub pressure_max: f64,
    /// Treat the legacy fill magnitudes as missing observations.
    pub legacy_fill_values: bool,
    /// Grids with at least this many cells are evaluated in parallel
    /// (only with the `rayon` feature).
    pub parallel_min_cells: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pressure_min: PRESSURE_MIN_DBAR,
            pressure_max: PRESSURE_MAX_DBAR,
            legacy_fill_values: true,
            parallel_min_cells: 4096,
        }
    }
}

impl Settings {
    /// Returns the settings with `pressure_min <= pressure_max`, swapping
    /// the bounds if they were given the wrong way round.
    pub fn normalized(mut self) -> Self {
        if self.pressure_min > self.pressure_max {
            std::mem::swap(&mut self.pressure_min, &mut self.pressure_max);
        }
        self
    }
}

/// A 1×1 grid holding `v`, the broadcastable form of a scalar argument.
pub fn scalar(v: f64) -> Array2<f64> {
    Array2::from_elem((1, 1), v)
}

/// A 1×N row vector.
pub fn row(values: &[f64]) -> Array2<f64> {
    Array2::from_shape_fn((1, values.len()), |(_, j)| values[j])
}

/// An M×1 column vector.
pub fn column(values: &[f64]) -> Array2<f64> {
    Array2::from_shape_fn((values.len(), 1), |(i, _)| values[i])
}

/// Builds a grid from explicitly tagged observations; `None` becomes the
/// missing-value marker (`NaN`). Returns `None` if `values` does not hold
/// exactly `rows * cols` cells.
pub fn from_options(rows: usize, cols: usize, values: Vec<Option<f64>>) -> Option<Array2<f64>> {
    let cells: Vec<f64> = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
    Array2::from_shape_vec((rows, cols), cells).ok()
}

/// Reads a grid back into tagged form, the inverse of [`from_options`].
pub fn to_options(grid: &Array2<f64>) -> Vec<Option<f64>> {
    grid.iter()
        .map(|&v| if v.is_nan() { None } else { Some(v) })
        .collect()
}
