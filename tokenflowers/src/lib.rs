//! # TokenfloweRS - Word-Level Embedding Modules in Pure Rust
//!
//! TokenfloweRS provides token embedding modules for NLP pipelines, built on
//! a minimal CPU tensor core:
//!
//! - **Pretrained Embeddings**: load text embedding files into lookup tables
//! - **Mismatched Pooling**: average wordpiece vectors back to word level
//!   using per-token offset spans
//! - **Sequence Encoders**: contextualize wordpiece sequences before pooling
//! - **Typed Configuration**: resolve embedders from JSON model configs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tokenflowers::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Build a word-level embedder from a model configuration.
//! let config = TokenEmbedderConfig::from_json(
//!     r#"{
//!         "type": "pretrained_embedding_mismatched",
//!         "pretrained_file": "glove.6B.50d.txt"
//!     }"#,
//! )?;
//! let embedder = match config.build::<f32>()? {
//!     BuiltEmbedder::Mismatched(e) => e,
//!     _ => unreachable!(),
//! };
//!
//! // One batch row: three wordpieces pooled into two original tokens.
//! let token_ids = Tensor::from_vec(vec![3i64, 14, 15], &[1, 3])?;
//! let mask = Tensor::from_vec(vec![true, true], &[1, 2])?;
//! let offsets = Tensor::from_vec(vec![0i64, 1, 2, 2], &[1, 2, 2])?;
//! let wordpiece_mask = Tensor::from_vec(vec![true, true, true], &[1, 3])?;
//!
//! let words = embedder.forward(&token_ids, &mask, &offsets, &wordpiece_mask, None, None)?;
//! assert_eq!(words.shape().dims(), &[1, 2, embedder.output_dim()]);
//! # Ok(())
//! # }
//! ```

pub use tokenflowers_core::{ops, Result, Shape, Tensor, TensorError};
pub use tokenflowers_nlp::{
    config, embedders, encoders, BuiltEmbedder, FeedForwardEncoder, MismatchedPoolingEmbedder,
    PassThroughEncoder, PretrainedEmbeddingEmbedder, PretrainedEmbeddingFile, SeqEncoder,
    SeqEncoderConfig, TokenEmbedder, TokenEmbedderConfig,
};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use tokenflowers_core::ops::{batched_span_select, mean_axis, sum_axis};
    pub use tokenflowers_core::{Result, Shape, Tensor, TensorError};
    pub use tokenflowers_nlp::{
        BuiltEmbedder, FeedForwardEncoder, MismatchedPoolingEmbedder, PassThroughEncoder,
        PretrainedEmbeddingEmbedder, PretrainedEmbeddingFile, SeqEncoder, SeqEncoderConfig,
        TokenEmbedder, TokenEmbedderConfig,
    };
}
