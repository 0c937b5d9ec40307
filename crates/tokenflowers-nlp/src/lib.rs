//! # TokenfloweRS NLP
//!
//! Token embedding modules for NLP pipelines built on `tokenflowers-core`.
//!
//! The centerpiece is [`MismatchedPoolingEmbedder`], which embeds wordpieces
//! with a pretrained embedding table and pools the resulting vectors back to
//! word-level representations using per-token wordpiece offset spans.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tokenflowers_nlp::TokenEmbedderConfig;
//!
//! # fn main() -> tokenflowers_core::Result<()> {
//! let config = TokenEmbedderConfig::from_json(
//!     r#"{
//!         "type": "pretrained_embedding_mismatched",
//!         "pretrained_file": "glove.6B.50d.txt"
//!     }"#,
//! )?;
//! let embedder = config.build::<f32>()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod embedders;
pub mod encoders;

pub use config::{SeqEncoderConfig, TokenEmbedderConfig};
pub use embedders::{
    BuiltEmbedder, MismatchedPoolingEmbedder, PretrainedEmbeddingEmbedder,
    PretrainedEmbeddingFile, TokenEmbedder,
};
pub use encoders::{FeedForwardEncoder, PassThroughEncoder, SeqEncoder};
