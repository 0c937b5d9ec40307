//! Pretrained embedding files and the wordpiece-level embedder.

use crate::embedders::TokenEmbedder;
use crate::encoders::SeqEncoder;
use num_traits::{Float, FromPrimitive};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tokenflowers_core::{Result, Tensor, TensorError};

const LOAD_OP: &str = "load_pretrained_embedding";

/// A text embedding file parsed into tokens and a dense weight matrix.
///
/// Expected format is one `token v1 v2 .. vd` row per line, whitespace
/// separated, optionally preceded by a `count dim` header line as written by
/// word2vec-style exporters. Token ids are row indices in file order.
pub struct PretrainedEmbeddingFile<T> {
    tokens: Vec<String>,
    weights: Vec<T>,
    embedding_dim: usize,
}

impl<T> PretrainedEmbeddingFile<T>
where
    T: Float + FromPrimitive,
{
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| TensorError::resource_error(LOAD_OP, &display, e.to_string()))?;

        let mut tokens: Vec<String> = Vec::new();
        let mut weights: Vec<T> = Vec::new();
        let mut embedding_dim = 0usize;
        let mut declared: Option<(usize, usize)> = None;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line =
                line.map_err(|e| TensorError::resource_error(LOAD_OP, &display, e.to_string()))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();

            // A first line of exactly two integers is a `count dim` header.
            if tokens.is_empty() && declared.is_none() && fields.len() == 2 {
                if let (Ok(count), Ok(dim)) =
                    (fields[0].parse::<usize>(), fields[1].parse::<usize>())
                {
                    declared = Some((count, dim));
                    continue;
                }
            }

            if fields.len() < 2 {
                return Err(TensorError::resource_error(
                    LOAD_OP,
                    &display,
                    format!("line {}: expected a token and its vector", line_no + 1),
                ));
            }

            let token = fields[0];
            let dim = fields.len() - 1;
            if embedding_dim == 0 {
                embedding_dim = dim;
            } else if dim != embedding_dim {
                return Err(TensorError::resource_error(
                    LOAD_OP,
                    &display,
                    format!(
                        "line {}: row has {} values, previous rows have {}",
                        line_no + 1,
                        dim,
                        embedding_dim
                    ),
                ));
            }

            for field in &fields[1..] {
                let value: f64 = field.parse().map_err(|_| {
                    TensorError::resource_error(
                        LOAD_OP,
                        &display,
                        format!("line {}: non-numeric value '{field}'", line_no + 1),
                    )
                })?;
                weights.push(T::from_f64(value).ok_or_else(|| {
                    TensorError::resource_error(
                        LOAD_OP,
                        &display,
                        format!("line {}: value {value} not representable", line_no + 1),
                    )
                })?);
            }
            tokens.push(token.to_string());
        }

        if tokens.is_empty() {
            return Err(TensorError::resource_error(
                LOAD_OP,
                &display,
                "file contains no embedding rows",
            ));
        }
        if let Some((count, dim)) = declared {
            if count != tokens.len() || dim != embedding_dim {
                return Err(TensorError::resource_error(
                    LOAD_OP,
                    &display,
                    format!(
                        "header declares {count} x {dim}, file holds {} x {}",
                        tokens.len(),
                        embedding_dim
                    ),
                ));
            }
        }

        Ok(Self {
            tokens,
            weights,
            embedding_dim,
        })
    }

    pub fn num_embeddings(&self) -> usize {
        self.tokens.len()
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    /// Tokens in file order; the position of a token is its id.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The `[num_embeddings, embedding_dim]` weight matrix.
    pub fn into_tensor(self) -> Result<Tensor<T>> {
        let shape = [self.tokens.len(), self.embedding_dim];
        Tensor::from_vec(self.weights, &shape)
    }
}

/// Wordpiece-level embedder backed by a pretrained embedding table.
///
/// Looks up one row per token id and, when an encoder is attached,
/// contextualizes the looked-up sequence with it before returning. The
/// `trainable` flag marks the table as an updatable parameter.
pub struct PretrainedEmbeddingEmbedder<T> {
    weight: Tensor<T>,
    encoder: Option<Box<dyn SeqEncoder<T>>>,
    num_embeddings: usize,
    embedding_dim: usize,
}

impl<T: Clone> Clone for PretrainedEmbeddingEmbedder<T> {
    fn clone(&self) -> Self {
        Self {
            weight: self.weight.clone(),
            encoder: self.encoder.clone(),
            num_embeddings: self.num_embeddings,
            embedding_dim: self.embedding_dim,
        }
    }
}

impl<T> PretrainedEmbeddingEmbedder<T>
where
    T: Float + FromPrimitive + Send + Sync + 'static,
{
    /// Load the embedding table from `pretrained_file`.
    ///
    /// Fails if the file cannot be read or parsed, or if the encoder's input
    /// width disagrees with the table's embedding width.
    pub fn new(
        pretrained_file: impl AsRef<Path>,
        encoder: Option<Box<dyn SeqEncoder<T>>>,
        trainable: bool,
    ) -> Result<Self> {
        let weights = PretrainedEmbeddingFile::load(pretrained_file)?.into_tensor()?;
        Self::from_weights(weights, encoder, trainable)
    }

    /// Build from an already materialized `[vocab, dim]` weight matrix.
    pub fn from_weights(
        weights: Tensor<T>,
        encoder: Option<Box<dyn SeqEncoder<T>>>,
        trainable: bool,
    ) -> Result<Self> {
        const OP: &str = "pretrained_embedding_embedder";
        let shape = weights.shape();
        if shape.rank() != 2 {
            return Err(TensorError::shape_mismatch(
                OP,
                "[num_embeddings, embedding_dim]",
                &shape.to_string(),
            ));
        }
        let (num_embeddings, embedding_dim) = (shape[0], shape[1]);
        if let Some(encoder) = &encoder {
            if encoder.input_dim() != embedding_dim {
                return Err(TensorError::invalid_argument(
                    OP,
                    format!(
                        "encoder expects input width {}, embedding width is {embedding_dim}",
                        encoder.input_dim()
                    ),
                ));
            }
        }

        let mut weight = weights;
        weight.set_requires_grad(trainable);
        Ok(Self {
            weight,
            encoder,
            num_embeddings,
            embedding_dim,
        })
    }

    pub fn num_embeddings(&self) -> usize {
        self.num_embeddings
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    /// Embed a `[batch, num_wordpieces]` id batch into
    /// `[batch, num_wordpieces, output_dim]` vectors.
    ///
    /// `type_ids` and `segment_concat_mask` are accepted and shape-checked so
    /// callers can pass a uniform input surface; a plain lookup table has no
    /// segment semantics, so neither alters the lookup.
    pub fn forward(
        &self,
        token_ids: &Tensor<i64>,
        wordpiece_mask: &Tensor<bool>,
        type_ids: Option<&Tensor<i64>>,
        segment_concat_mask: Option<&Tensor<bool>>,
    ) -> Result<Tensor<T>> {
        const OP: &str = "pretrained_embedding_forward";
        let id_shape = token_ids.shape();
        if id_shape.rank() != 2 {
            return Err(TensorError::shape_mismatch(
                OP,
                "[batch, num_wordpieces]",
                &id_shape.to_string(),
            ));
        }
        if wordpiece_mask.shape() != id_shape {
            return Err(TensorError::shape_mismatch(
                OP,
                &format!("wordpiece_mask {id_shape}"),
                &wordpiece_mask.shape().to_string(),
            ));
        }
        if let Some(type_ids) = type_ids {
            if type_ids.shape() != id_shape {
                return Err(TensorError::shape_mismatch(
                    OP,
                    &format!("type_ids {id_shape}"),
                    &type_ids.shape().to_string(),
                ));
            }
        }
        if let Some(segment_concat_mask) = segment_concat_mask {
            if segment_concat_mask.shape() != id_shape {
                return Err(TensorError::shape_mismatch(
                    OP,
                    &format!("segment_concat_mask {id_shape}"),
                    &segment_concat_mask.shape().to_string(),
                ));
            }
        }

        let ids = token_ids
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "token_ids tensor is not contiguous"))?;
        let table = self
            .weight
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "weight tensor is not contiguous"))?;

        let dim = self.embedding_dim;
        let mut data = Vec::with_capacity(ids.len() * dim);
        for &id in ids {
            if id < 0 || id as usize >= self.num_embeddings {
                return Err(TensorError::invalid_argument(
                    OP,
                    format!(
                        "token id {id} out of range for vocabulary of {}",
                        self.num_embeddings
                    ),
                ));
            }
            let row = id as usize * dim;
            data.extend_from_slice(&table[row..row + dim]);
        }

        let embeddings = Tensor::from_vec(data, &[id_shape[0], id_shape[1], dim])?;
        match &self.encoder {
            Some(encoder) => encoder.forward(&embeddings, wordpiece_mask),
            None => Ok(embeddings),
        }
    }
}

impl<T> TokenEmbedder<T> for PretrainedEmbeddingEmbedder<T> {
    fn output_dim(&self) -> usize {
        self.encoder
            .as_ref()
            .map(|e| e.output_dim())
            .unwrap_or(self.embedding_dim)
    }

    fn parameters(&self) -> Vec<&Tensor<T>> {
        let mut params = vec![&self.weight];
        if let Some(encoder) = &self.encoder {
            params.extend(encoder.parameters());
        }
        params
    }
}
