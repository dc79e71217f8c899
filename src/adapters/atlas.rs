//! Absolute Salinity Anomaly Ratio (SAAR) sources.
//!
//! SAAR is the fractional excess of Absolute Salinity over Reference
//! Salinity caused by regional composition differences, so that
//! `SA = SR * (1 + SAAR)`. The global TEOS-10 atlas is large and shipped
//! separately; this module defines the lookup seam and a trilinear
//! interpolator over any caller-supplied grid.

use std::cmp::Ordering;

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::error::GswError;

pub trait AnomalyAtlas: Sync {
    /// SAAR at sea pressure `p` (dbar), longitude `long` (degrees east,
    /// [0, 360]) and latitude `lat`. `NaN` where no estimate exists.
    fn saar(&self, p: f64, long: f64, lat: f64) -> f64;
}

/// Standard Seawater composition everywhere: SAAR is zero and SA equals SR.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSeawater;

impl AnomalyAtlas for StandardSeawater {
    fn saar(&self, p: f64, long: f64, lat: f64) -> f64 {
        if p.is_nan() || long.is_nan() || lat.is_nan() {
            f64::NAN
        } else {
            0.0
        }
    }
}

impl<A: AnomalyAtlas + ?Sized> AnomalyAtlas for &A {
    fn saar(&self, p: f64, long: f64, lat: f64) -> f64 {
        (**self).saar(p, long, lat)
    }
}

/// Serialized form of a gridded atlas.
///
/// `values` is ordered pressure-major, then latitude, then longitude
/// (longitude varies fastest). `null` marks a node without data, e.g. below
/// the sea floor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AtlasGrid {
    pub longitudes: Vec<f64>,
    pub latitudes: Vec<f64>,
    pub pressures: Vec<f64>,
    pub values: Vec<Option<f64>>,
}

/// SAAR interpolated trilinearly from a regular (p, lat, long) grid.
///
/// Within a pressure level, missing corner nodes are replaced by the mean of
/// the corners that are present. If one of the two bracketing levels has no
/// data at all, the other level is used as is. Positions outside the grid
/// take the value at its nearest edge, except that a longitude axis whose gap
/// across the 360° seam is no wider than its widest step is treated as
/// periodic and interpolated through the seam.
#[derive(Clone, Debug)]
pub struct GriddedAtlas {
    longitudes: Vec<f64>,
    periodic: bool,
    latitudes: Vec<f64>,
    pressures: Vec<f64>,
    values: Array3<f64>,
}

impl TryFrom<AtlasGrid> for GriddedAtlas {
    type Error = GswError;

    fn try_from(grid: AtlasGrid) -> Result<Self, Self::Error> {
        for (name, axis) in [
            ("longitudes", &grid.longitudes),
            ("latitudes", &grid.latitudes),
            ("pressures", &grid.pressures),
        ] {
            if axis.is_empty() {
                return Err(GswError::InvalidAtlas(format!("{name} axis is empty")));
            }
            if axis.windows(2).any(|w| w[0].partial_cmp(&w[1]) != Some(Ordering::Less)) {
                return Err(GswError::InvalidAtlas(format!(
                    "{name} axis is not strictly increasing"
                )));
            }
        }

        let dim = (
            grid.pressures.len(),
            grid.latitudes.len(),
            grid.longitudes.len(),
        );
        let expected = dim.0 * dim.1 * dim.2;
        if grid.values.len() != expected {
            return Err(GswError::InvalidAtlas(format!(
                "expected {expected} values for a {}x{}x{} grid, got {}",
                dim.0,
                dim.1,
                dim.2,
                grid.values.len()
            )));
        }

        let cells = grid
            .values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        let values = Array3::from_shape_vec(dim, cells)
            .map_err(|e| GswError::InvalidAtlas(e.to_string()))?;

        Ok(Self {
            periodic: is_periodic(&grid.longitudes),
            longitudes: grid.longitudes,
            latitudes: grid.latitudes,
            pressures: grid.pressures,
            values,
        })
    }
}

/// True when the longitudes wrap around the globe with no wider gap at the
/// seam than between neighbouring nodes.
fn is_periodic(longitudes: &[f64]) -> bool {
    let (Some(&first), Some(&last)) = (longitudes.first(), longitudes.last()) else {
        return false;
    };
    let seam = first + 360.0 - last;
    let widest = longitudes
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(0.0, f64::max);
    longitudes.len() > 1 && seam > 0.0 && seam <= widest
}

impl GriddedAtlas {
    fn locate_longitude(&self, long: f64) -> Bracket {
        if !self.periodic {
            return Bracket::locate(&self.longitudes, long);
        }
        let first = self.longitudes[0];
        let last = self.longitudes.len() - 1;
        let x = first + (long - first).rem_euclid(360.0);
        if x <= self.longitudes[last] {
            return Bracket::locate(&self.longitudes, x);
        }
        // Between the last node and the first one, across the seam.
        let seam_end = first + 360.0;
        Bracket {
            lower: last,
            upper: 0,
            weight: (x - self.longitudes[last]) / (seam_end - self.longitudes[last]),
        }
    }

    /// Bilinear estimate on pressure level `k`, or `None` if the four
    /// surrounding nodes are all missing.
    fn level(&self, k: usize, lon: Bracket, lat: Bracket) -> Option<f64> {
        let mut corners = [
            self.values[[k, lat.lower, lon.lower]],
            self.values[[k, lat.lower, lon.upper]],
            self.values[[k, lat.upper, lon.lower]],
            self.values[[k, lat.upper, lon.upper]],
        ];

        let present: Vec<f64> = corners.iter().copied().filter(|v| !v.is_nan()).collect();
        if present.is_empty() {
            return None;
        }
        if present.len() < corners.len() {
            let mean = present.iter().sum::<f64>() / present.len() as f64;
            for c in corners.iter_mut().filter(|c| c.is_nan()) {
                *c = mean;
            }
        }

        let [c00, c01, c10, c11] = corners;
        let south = c00 + lon.weight * (c01 - c00);
        let north = c10 + lon.weight * (c11 - c10);
        Some(south + lat.weight * (north - south))
    }
}

impl AnomalyAtlas for GriddedAtlas {
    fn saar(&self, p: f64, long: f64, lat: f64) -> f64 {
        if p.is_nan() || long.is_nan() || lat.is_nan() {
            return f64::NAN;
        }
        let lon = self.locate_longitude(long);
        let lat = Bracket::locate(&self.latitudes, lat);
        let depth = Bracket::locate(&self.pressures, p);

        match (
            self.level(depth.lower, lon, lat),
            self.level(depth.upper, lon, lat),
        ) {
            (Some(a), Some(b)) => a + depth.weight * (b - a),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => f64::NAN,
        }
    }
}

/// Neighbouring indices on an axis and the fractional position between them.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    lower: usize,
    upper: usize,
    weight: f64,
}

impl Bracket {
    fn locate(axis: &[f64], x: f64) -> Self {
        let last = axis.len() - 1;
        if x <= axis[0] {
            return Self::at(0);
        }
        if x >= axis[last] {
            return Self::at(last);
        }
        let lower = axis.partition_point(|&a| a <= x) - 1;
        let upper = lower + 1;
        Self {
            lower,
            upper,
            weight: (x - axis[lower]) / (axis[upper] - axis[lower]),
        }
    }

    fn at(index: usize) -> Self {
        Self {
            lower: index,
            upper: index,
            weight: 0.0,
        }
    }
}
