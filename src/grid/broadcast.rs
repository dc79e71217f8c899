use log::{debug, trace};
use ndarray::{Array2, ArrayView2};

use crate::error::GswError;

/// How an auxiliary argument maps onto an M×N primary grid.
///
/// The kind is inferred once from the argument's shape and the target shape,
/// then used to build a fresh M×N array. Rules are tried in declaration
/// order, so when M == N a vector of length M is read as a column vector
/// before it could be read as a transposed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastKind {
    /// 1×1, copied into every cell.
    Scalar,
    /// 1×N, replicated down the M rows.
    RowVector,
    /// M×1, replicated across the N columns.
    ColumnVector,
    /// N×1 meant as 1×N: transposed, then replicated down the rows.
    TransposedRow,
    /// 1×M meant as M×1: transposed, then replicated across the columns.
    /// Only accepted for arguments that opt in (longitude).
    TransposedColumn,
    /// Already M×N.
    Matrix,
}

impl BroadcastKind {
    /// Classifies an argument of shape `found` against the `target` grid.
    pub fn infer(
        found: (usize, usize),
        target: (usize, usize),
        allow_transposed_column: bool,
    ) -> Option<Self> {
        let (m, n) = target;
        match found {
            (1, 1) => Some(BroadcastKind::Scalar),
            (1, c) if c == n => Some(BroadcastKind::RowVector),
            (r, 1) if r == m => Some(BroadcastKind::ColumnVector),
            (r, 1) if r == n => Some(BroadcastKind::TransposedRow),
            (1, c) if c == m && allow_transposed_column => Some(BroadcastKind::TransposedColumn),
            (r, c) if r == m && c == n => Some(BroadcastKind::Matrix),
            _ => None,
        }
    }

    /// Builds the `target`-shaped grid described by this kind.
    pub fn expand(self, data: ArrayView2<'_, f64>, target: (usize, usize)) -> Array2<f64> {
        match self {
            BroadcastKind::Scalar => Array2::from_elem(target, data[[0, 0]]),
            BroadcastKind::RowVector => Array2::from_shape_fn(target, |(_, j)| data[[0, j]]),
            BroadcastKind::ColumnVector => Array2::from_shape_fn(target, |(i, _)| data[[i, 0]]),
            BroadcastKind::TransposedRow => Array2::from_shape_fn(target, |(_, j)| data[[j, 0]]),
            BroadcastKind::TransposedColumn => {
                Array2::from_shape_fn(target, |(i, _)| data[[0, i]])
            }
            BroadcastKind::Matrix => data.to_owned(),
        }
    }
}

/// Broadcasts `data` (the argument called `argument`) onto a grid of shape
/// `target`, the shape of the argument called `reference`.
///
/// The result is always a fresh array; `data` is never aliased.
pub fn reconcile(
    argument: &'static str,
    data: ArrayView2<'_, f64>,
    reference: &'static str,
    target: (usize, usize),
    allow_transposed_column: bool,
) -> Result<Array2<f64>, GswError> {
    let found = data.dim();
    let kind = BroadcastKind::infer(found, target, allow_transposed_column).ok_or_else(|| {
        GswError::ShapeMismatch {
            argument,
            reference,
            found,
            expected: target,
        }
    })?;
    trace!("{argument}: {found:?} -> {target:?} as {kind:?}");
    Ok(kind.expand(data, target))
}

/// Fails unless `data` has exactly the `target` shape.
pub fn require_same_shape(
    argument: &'static str,
    data: ArrayView2<'_, f64>,
    reference: &'static str,
    target: (usize, usize),
) -> Result<(), GswError> {
    let found = data.dim();
    if found == target {
        Ok(())
    } else {
        Err(GswError::ShapeMismatch {
            argument,
            reference,
            found,
            expected: target,
        })
    }
}

/// Canonical orientation of a call.
///
/// A single 1×K observation is evaluated as K×1 and turned back on the way
/// out, so the pipelines always see column-oriented vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    transposed: bool,
}

impl Orientation {
    /// Orientation for a primary grid of `shape`: transposed for 1×K with
    /// K > 1.
    pub fn for_shape(shape: (usize, usize)) -> Self {
        let transposed = shape.0 == 1 && shape.1 > 1;
        if transposed {
            debug!("single-row observation of {} cells, evaluating as a column", shape.1);
        }
        Self { transposed }
    }

    /// Whether grids are flipped on the way in and out.
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Moves an already-reconciled grid into canonical orientation.
    pub fn canonical(&self, grid: Array2<f64>) -> Array2<f64> {
        self.flip(grid)
    }

    /// Moves a result back into the caller's orientation.
    pub fn restore(&self, grid: Array2<f64>) -> Array2<f64> {
        self.flip(grid)
    }

    fn flip(&self, grid: Array2<f64>) -> Array2<f64> {
        if self.transposed {
            grid.reversed_axes().as_standard_layout().into_owned()
        } else {
            grid
        }
    }
}
