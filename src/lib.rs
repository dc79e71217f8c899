//! Derived TEOS-10 seawater properties over 2-D grids.
//!
//! The crate computes the Absolute Salinity Anomaly and the cabbeling and
//! thermobaric coefficients from arrays of observations, with the
//! broadcasting, fill-value and domain rules of the GSW toolbox. The
//! underlying thermodynamic primitives are reached through
//! [`ThermodynamicKernel`]; [`Teos10Kernel`] is the `gsw`-backed default.

pub mod adapters;
pub mod error;
pub mod grid;
pub mod models;
pub mod salinity;

pub use crate::adapters::{
    AnomalyAtlas, AtlasGrid, GriddedAtlas, SpecvolFirstDerivatives, SpecvolSecondDerivatives,
    StandardSeawater, Teos10Kernel, ThermodynamicKernel,
};
pub use crate::error::{GswError, RangeField};
pub use crate::models::{Settings, column, from_options, row, scalar, to_options};
pub use crate::salinity::calculator::Calculator;
