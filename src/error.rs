use std::fmt;

use thiserror::Error;

/// A validated field whose values must lie inside a physical domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Pressure,
    Longitude,
    Latitude,
}

impl fmt::Display for RangeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeField::Pressure => write!(f, "pressure"),
            RangeField::Longitude => write!(f, "longitude"),
            RangeField::Latitude => write!(f, "latitude"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GswError {
    #[error("{function} requires exactly {expected} arguments, got {found}")]
    Arity {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(
        "{argument} has shape {}x{} which cannot be reconciled with {reference} ({}x{})",
        .found.0, .found.1, .expected.0, .expected.1
    )]
    ShapeMismatch {
        argument: &'static str,
        reference: &'static str,
        found: (usize, usize),
        expected: (usize, usize),
    },

    #[error("{field} out of range: {value} is outside [{min}, {max}]")]
    Range {
        field: RangeField,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Invalid anomaly atlas: {0}")]
    InvalidAtlas(String),
}
