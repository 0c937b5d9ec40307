//! Token embedders.
//!
//! - `pretrained`: embedding-file loading and the wordpiece-level embedder.
//! - `mismatched`: word-level embedder pooling wordpiece vectors over
//!   per-token offset spans.

pub mod mismatched;
pub mod pretrained;

pub use mismatched::MismatchedPoolingEmbedder;
pub use pretrained::{PretrainedEmbeddingEmbedder, PretrainedEmbeddingFile};

use tokenflowers_core::Tensor;

/// Common surface of all token embedders.
///
/// The embedding width is fixed at construction and independent of any
/// forward call. Forward signatures differ per embedder (the word-level
/// embedder needs offset spans the wordpiece-level one does not), so they are
/// inherent methods on the concrete types.
pub trait TokenEmbedder<T> {
    /// Width of the vectors this embedder produces.
    fn output_dim(&self) -> usize;

    /// Owned weight tensors, including those of an attached encoder.
    fn parameters(&self) -> Vec<&Tensor<T>>;
}

/// Token embedder resolved from a [`TokenEmbedderConfig`](crate::config::TokenEmbedderConfig).
///
/// Construction by configuration is a closed set of variants keyed by the
/// config's `type` tag; callers match on the variant to reach the concrete
/// forward signature.
#[derive(Clone)]
pub enum BuiltEmbedder<T> {
    Matched(PretrainedEmbeddingEmbedder<T>),
    Mismatched(MismatchedPoolingEmbedder<T>),
}

impl<T> TokenEmbedder<T> for BuiltEmbedder<T> {
    fn output_dim(&self) -> usize {
        match self {
            BuiltEmbedder::Matched(e) => e.output_dim(),
            BuiltEmbedder::Mismatched(e) => e.output_dim(),
        }
    }

    fn parameters(&self) -> Vec<&Tensor<T>> {
        match self {
            BuiltEmbedder::Matched(e) => TokenEmbedder::parameters(e),
            BuiltEmbedder::Mismatched(e) => TokenEmbedder::parameters(e),
        }
    }
}
