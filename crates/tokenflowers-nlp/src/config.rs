//! Typed model configuration.
//!
//! Embedders and encoders are described by serde-deserializable configs and
//! resolved into concrete modules by `build()` at configuration-load time.
//! The `type` tag selects the variant; tag values are stable identifiers that
//! model configurations refer to.

use crate::embedders::{BuiltEmbedder, MismatchedPoolingEmbedder, PretrainedEmbeddingEmbedder};
use crate::encoders::{FeedForwardEncoder, PassThroughEncoder, SeqEncoder};
use num_traits::{Float, FromPrimitive};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokenflowers_core::{Result, TensorError};

/// Configuration of a [`SeqEncoder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeqEncoderConfig {
    PassThrough {
        dim: usize,
    },
    FeedForward {
        input_dim: usize,
        output_dim: usize,
    },
}

impl SeqEncoderConfig {
    pub fn build<T>(&self) -> Result<Box<dyn SeqEncoder<T>>>
    where
        T: Float + FromPrimitive + Send + Sync + 'static,
    {
        match self {
            SeqEncoderConfig::PassThrough { dim } => Ok(Box::new(PassThroughEncoder::new(*dim))),
            SeqEncoderConfig::FeedForward {
                input_dim,
                output_dim,
            } => Ok(Box::new(FeedForwardEncoder::new(*input_dim, *output_dim)?)),
        }
    }
}

fn default_trainable() -> bool {
    true
}

/// Configuration of a token embedder.
///
/// The `"pretrained_embedding"` variant embeds wordpieces directly; the
/// `"pretrained_embedding_mismatched"` variant additionally pools wordpiece
/// vectors back to original-token granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TokenEmbedderConfig {
    #[serde(rename = "pretrained_embedding")]
    PretrainedEmbedding {
        pretrained_file: PathBuf,
        #[serde(default)]
        encoder: Option<SeqEncoderConfig>,
        #[serde(default = "default_trainable")]
        trainable: bool,
    },
    #[serde(rename = "pretrained_embedding_mismatched")]
    PretrainedEmbeddingMismatched {
        pretrained_file: PathBuf,
        #[serde(default)]
        encoder: Option<SeqEncoderConfig>,
        #[serde(default = "default_trainable")]
        trainable: bool,
    },
}

impl TokenEmbedderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TensorError::invalid_argument("token_embedder_config", e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TensorError::resource_error(
                "token_embedder_config",
                path.display().to_string(),
                e.to_string(),
            )
        })?;
        Self::from_json(&text)
    }

    /// Resolve the configuration into a constructed embedder.
    pub fn build<T>(&self) -> Result<BuiltEmbedder<T>>
    where
        T: Float + FromPrimitive + Send + Sync + 'static,
    {
        match self {
            TokenEmbedderConfig::PretrainedEmbedding {
                pretrained_file,
                encoder,
                trainable,
            } => {
                let encoder = encoder.as_ref().map(|c| c.build()).transpose()?;
                Ok(BuiltEmbedder::Matched(PretrainedEmbeddingEmbedder::new(
                    pretrained_file,
                    encoder,
                    *trainable,
                )?))
            }
            TokenEmbedderConfig::PretrainedEmbeddingMismatched {
                pretrained_file,
                encoder,
                trainable,
            } => {
                let encoder = encoder.as_ref().map(|c| c.build()).transpose()?;
                Ok(BuiltEmbedder::Mismatched(MismatchedPoolingEmbedder::new(
                    pretrained_file,
                    encoder,
                    *trainable,
                )?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mismatched_config() -> Result<()> {
        let config = TokenEmbedderConfig::from_json(
            r#"{
                "type": "pretrained_embedding_mismatched",
                "pretrained_file": "vectors.txt",
                "encoder": {"type": "pass_through", "dim": 50}
            }"#,
        )?;

        match &config {
            TokenEmbedderConfig::PretrainedEmbeddingMismatched {
                pretrained_file,
                encoder,
                trainable,
            } => {
                assert_eq!(pretrained_file, &PathBuf::from("vectors.txt"));
                assert_eq!(encoder, &Some(SeqEncoderConfig::PassThrough { dim: 50 }));
                assert!(*trainable);
            }
            other => panic!("parsed into wrong variant: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_trainable_defaults_to_true() -> Result<()> {
        let config = TokenEmbedderConfig::from_json(
            r#"{"type": "pretrained_embedding", "pretrained_file": "v.txt"}"#,
        )?;
        match config {
            TokenEmbedderConfig::PretrainedEmbedding {
                trainable, encoder, ..
            } => {
                assert!(trainable);
                assert!(encoder.is_none());
            }
            other => panic!("parsed into wrong variant: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = TokenEmbedderConfig::from_json(r#"{"type": "bag_of_words"}"#);
        assert!(matches!(err, Err(TensorError::InvalidArgument { .. })));
    }

    #[test]
    fn test_config_round_trip() -> Result<()> {
        let config = TokenEmbedderConfig::PretrainedEmbeddingMismatched {
            pretrained_file: PathBuf::from("vectors.txt"),
            encoder: Some(SeqEncoderConfig::FeedForward {
                input_dim: 50,
                output_dim: 32,
            }),
            trainable: false,
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("pretrained_embedding_mismatched"));
        assert_eq!(TokenEmbedderConfig::from_json(&json)?, config);
        Ok(())
    }

    #[test]
    fn test_encoder_config_build() -> Result<()> {
        let encoder = SeqEncoderConfig::FeedForward {
            input_dim: 4,
            output_dim: 2,
        }
        .build::<f32>()?;
        assert_eq!(encoder.input_dim(), 4);
        assert_eq!(encoder.output_dim(), 2);
        Ok(())
    }

    #[test]
    fn test_build_fails_on_missing_file() {
        let config = TokenEmbedderConfig::PretrainedEmbeddingMismatched {
            pretrained_file: PathBuf::from("/nonexistent/vectors.txt"),
            encoder: None,
            trainable: true,
        };
        let err = config.build::<f32>();
        assert!(matches!(err, Err(TensorError::ResourceError { .. })));
    }
}
