//! CPU tensor type.
//!
//! The tensor is split into a `core` module holding the structure and its
//! accessors and a `creation` module holding the constructors.

pub mod core;
pub mod creation;

pub use core::Tensor;
