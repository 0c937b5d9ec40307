//! Word-level pooling over wordpiece embeddings.

use crate::embedders::{PretrainedEmbeddingEmbedder, TokenEmbedder};
use crate::encoders::SeqEncoder;
use num_traits::{Float, FromPrimitive};
use std::path::Path;
use tokenflowers_core::ops::{batched_span_select, sum_axis};
use tokenflowers_core::{Result, Tensor, TensorError};

const OP: &str = "mismatched_pooling_forward";

/// Embeds wordpieces and pools the resulting vectors back to word level.
///
/// Wordpiece tokenization splits original tokens into one or more pieces;
/// this embedder restores the original granularity by averaging each token's
/// wordpiece vectors over its `[start, end]` offset span. Embedding and
/// optional contextualization are delegated to an inner
/// [`PretrainedEmbeddingEmbedder`] that this module owns exclusively.
#[derive(Clone)]
pub struct MismatchedPoolingEmbedder<T> {
    inner: PretrainedEmbeddingEmbedder<T>,
}

impl<T> MismatchedPoolingEmbedder<T>
where
    T: Float + FromPrimitive + Send + Sync + 'static,
{
    /// Load the embedding table from `pretrained_file`.
    ///
    /// Construction fails if the file is missing or malformed, or if the
    /// encoder's input width disagrees with the table's embedding width.
    pub fn new(
        pretrained_file: impl AsRef<Path>,
        encoder: Option<Box<dyn SeqEncoder<T>>>,
        trainable: bool,
    ) -> Result<Self> {
        Ok(Self {
            inner: PretrainedEmbeddingEmbedder::new(pretrained_file, encoder, trainable)?,
        })
    }

    /// Wrap an already constructed wordpiece embedder.
    pub fn from_embedder(inner: PretrainedEmbeddingEmbedder<T>) -> Self {
        Self { inner }
    }

    /// Pool wordpiece embeddings into original-token embeddings.
    ///
    /// - `token_ids`: `[batch, num_wordpieces]` wordpiece ids.
    /// - `mask`: `[batch, num_orig_tokens]` validity of each original token
    ///   slot; shape-checked but not consumed by the pooling arithmetic.
    /// - `offsets`: `[batch, num_orig_tokens, 2]`, each pair the inclusive
    ///   wordpiece span `[start, end]` of one original token.
    /// - `wordpiece_mask`: `[batch, num_wordpieces]` validity of each
    ///   wordpiece slot.
    /// - `type_ids`, `segment_concat_mask`: forwarded to the inner embedder.
    ///
    /// Returns `[batch, num_orig_tokens, output_dim]`: the arithmetic mean of
    /// each token's real wordpiece vectors. A wordpiece is real when it lies
    /// inside the token's span and its `wordpiece_mask` slot is set; masked
    /// wordpieces contribute neither to the sum nor to the divisor.
    ///
    /// A token whose span contains no real wordpiece divides zero by zero and
    /// yields a non-finite vector. Callers must ensure every token marked
    /// real in `mask` spans at least one real wordpiece.
    pub fn forward(
        &self,
        token_ids: &Tensor<i64>,
        mask: &Tensor<bool>,
        offsets: &Tensor<i64>,
        wordpiece_mask: &Tensor<bool>,
        type_ids: Option<&Tensor<i64>>,
        segment_concat_mask: Option<&Tensor<bool>>,
    ) -> Result<Tensor<T>> {
        let offsets_shape = offsets.shape();
        if offsets_shape.rank() != 3 || offsets_shape[2] != 2 {
            return Err(TensorError::shape_mismatch(
                OP,
                "[batch, num_orig_tokens, 2]",
                &offsets_shape.to_string(),
            ));
        }
        if mask.shape().dims() != &offsets_shape.dims()[..2] {
            return Err(TensorError::shape_mismatch(
                OP,
                &format!("mask [{}, {}]", offsets_shape[0], offsets_shape[1]),
                &mask.shape().to_string(),
            ));
        }

        // [batch, num_wordpieces, dim]
        let embeddings =
            self.inner
                .forward(token_ids, wordpiece_mask, type_ids, segment_concat_mask)?;

        // span_embeddings: [batch, num_orig_tokens, max_span_width, dim]
        // span_mask:       [batch, num_orig_tokens, max_span_width]
        let (span_embeddings, span_mask) = batched_span_select(&embeddings, offsets)?;

        let span_shape = span_embeddings.shape();
        let (batch, num_tokens, max_width, dim) =
            (span_shape[0], span_shape[1], span_shape[2], span_shape[3]);
        let num_wordpieces = wordpiece_mask.shape()[1];

        let span_data = span_embeddings.as_slice().ok_or_else(|| {
            TensorError::invalid_argument(OP, "span embeddings are not contiguous")
        })?;
        let span_mask_data = span_mask
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "span mask is not contiguous"))?;
        let wp_mask_data = wordpiece_mask.as_slice().ok_or_else(|| {
            TensorError::invalid_argument(OP, "wordpiece mask is not contiguous")
        })?;
        let offset_data = offsets
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "offsets are not contiguous"))?;

        // A span position is real when it is inside the span and the
        // wordpiece it points at is itself unpadded.
        let positions = batch * num_tokens * max_width;
        let mut masked = vec![T::zero(); positions * dim];
        let mut lengths = vec![T::zero(); positions];
        for b in 0..batch {
            for t in 0..num_tokens {
                let token = b * num_tokens + t;
                let start = offset_data[token * 2] as usize;
                for k in 0..max_width {
                    let pos = token * max_width + k;
                    if span_mask_data[pos] && wp_mask_data[b * num_wordpieces + start + k] {
                        masked[pos * dim..(pos + 1) * dim]
                            .copy_from_slice(&span_data[pos * dim..(pos + 1) * dim]);
                        lengths[pos] = T::one();
                    }
                }
            }
        }

        let masked = Tensor::from_vec(masked, &[batch, num_tokens, max_width, dim])?;
        let lengths = Tensor::from_vec(lengths, &[batch, num_tokens, max_width])?;

        // Sum real wordpiece vectors and counts over the span axis, then
        // divide to get the per-token mean.
        let sums = sum_axis(&masked, 2, false)?;
        let counts = sum_axis(&lengths, 2, false)?;

        let sums_data = sums
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "span sums are not contiguous"))?;
        let counts_data = counts
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "span counts are not contiguous"))?;

        let mut pooled = vec![T::zero(); batch * num_tokens * dim];
        for (token, &count) in counts_data.iter().enumerate() {
            for j in 0..dim {
                pooled[token * dim + j] = sums_data[token * dim + j] / count;
            }
        }

        Tensor::from_vec(pooled, &[batch, num_tokens, dim])
    }
}

impl<T> TokenEmbedder<T> for MismatchedPoolingEmbedder<T> {
    fn output_dim(&self) -> usize {
        self.inner.output_dim()
    }

    fn parameters(&self) -> Vec<&Tensor<T>> {
        self.inner.parameters()
    }
}
