//! Grid plumbing shared by every derived-property pipeline: broadcasting
//! auxiliary arguments onto the primary grid, the canonical orientation of
//! single-row observations, and per-cell sanitization.

pub mod broadcast;
pub mod cells;
pub mod sanitize;

pub use broadcast::{BroadcastKind, Orientation, reconcile, require_same_shape};
