//! Thermodynamic primitives consumed by the derived-property pipelines.
//!
//! The pipelines only ever talk to a [`ThermodynamicKernel`]; the TEOS-10
//! implementation lives in [`teos10`] and takes its composition anomaly from
//! an [`AnomalyAtlas`].

pub mod atlas;
pub mod kernel;
pub mod teos10;

pub use atlas::{AnomalyAtlas, AtlasGrid, GriddedAtlas, StandardSeawater};
pub use kernel::{SpecvolFirstDerivatives, SpecvolSecondDerivatives, ThermodynamicKernel};
pub use teos10::Teos10Kernel;
