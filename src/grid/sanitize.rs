//! Per-cell corrections and call-level domain checks.
//!
//! Everything here operates on grids that the pipelines own (fresh copies
//! produced by broadcasting), never on caller data. Cell-level noise is
//! corrected in place: fill codes and implausible salinities become `NaN`,
//! negative salinities become zero. Domain violations of pressure or
//! position abort the whole call with [`GswError::Range`].

use log::debug;
use ndarray::{Array2, Zip};

use crate::error::{GswError, RangeField};

pub const LONGITUDE_MIN: f64 = 0.0;
pub const LONGITUDE_MAX: f64 = 360.0;
pub const LATITUDE_MIN: f64 = -90.0;
pub const LATITUDE_MAX: f64 = 90.0;

/// Replaces every cell exactly equal to one of `codes` with `NaN`.
pub fn replace_fill_values(grid: &mut Array2<f64>, codes: &[f64]) -> usize {
    let mut replaced = 0;
    grid.map_inplace(|v| {
        if codes.contains(&*v) {
            *v = f64::NAN;
            replaced += 1;
        }
    });
    replaced
}

/// Moves negative longitudes onto the [0, 360) convention.
pub fn wrap_longitude(long: &mut Array2<f64>) {
    long.map_inplace(|v| {
        if *v < 0.0 {
            *v += 360.0;
        }
    });
}

/// Marks SP as missing where the salinity cannot occur at that pressure:
/// above 120 in the upper 100 dbar, above 42 below it.
pub fn flag_implausible_salinity(sp: &mut Array2<f64>, p: &Array2<f64>) -> usize {
    let mut flagged = 0;
    Zip::from(sp).and(p).for_each(|s, &p| {
        if (p < 100.0 && *s > 120.0) || (p >= 100.0 && *s > 42.0) {
            *s = f64::NAN;
            flagged += 1;
        }
    });
    if flagged > 0 {
        debug!("{flagged} SP cells implausible for their pressure, set missing");
    }
    flagged
}

/// Clamps negative salinities to zero. Missing cells stay missing.
pub fn clamp_negative_salinity(grid: &mut Array2<f64>) -> usize {
    let mut clamped = 0;
    grid.map_inplace(|v| {
        if *v < 0.0 {
            *v = 0.0;
            clamped += 1;
        }
    });
    if clamped > 0 {
        debug!("{clamped} negative salinity cells clamped to zero");
    }
    clamped
}

/// Fails with the first cell outside `[min, max]`. Missing cells never fail.
pub fn check_range(
    field: RangeField,
    grid: &Array2<f64>,
    min: f64,
    max: f64,
) -> Result<(), GswError> {
    match grid.iter().find(|&&v| v < min || v > max) {
        Some(&value) => Err(GswError::Range {
            field,
            value,
            min,
            max,
        }),
        None => Ok(()),
    }
}

pub fn check_position(long: &Array2<f64>, lat: &Array2<f64>) -> Result<(), GswError> {
    check_range(RangeField::Longitude, long, LONGITUDE_MIN, LONGITUDE_MAX)?;
    check_range(RangeField::Latitude, lat, LATITUDE_MIN, LATITUDE_MAX)
}
