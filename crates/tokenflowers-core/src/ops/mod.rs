//! Batched tensor operations.
//!
//! - `reduction`: axis-wise reductions (sum, mean).
//! - `span`: gathering variable-length index spans from padded sequences.

pub mod reduction;
pub mod span;

pub use reduction::{mean_axis, sum_axis};
pub use span::batched_span_select;
