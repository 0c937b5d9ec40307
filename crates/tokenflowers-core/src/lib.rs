//! # TokenfloweRS Core
//!
//! Core tensor types and operations for the TokenfloweRS NLP modules.
//! Provides a CPU tensor backed by `ndarray`, shape metadata, the shared
//! error type, and the batched operations the embedding layers build on.

pub mod error;
pub mod ops;
pub mod shape;
pub mod tensor;

pub use error::{Result, TensorError};
pub use shape::Shape;
pub use tensor::Tensor;
