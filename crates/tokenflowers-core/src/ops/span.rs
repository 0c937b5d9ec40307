use crate::{Result, Tensor, TensorError};
use num_traits::Zero;

const OP: &str = "batched_span_select";

/// Gather index spans from a batch of padded sequences.
///
/// `sequence` has shape `[batch, seq_len, features]` and `spans` has shape
/// `[batch, num_spans, 2]`, each pair an inclusive `[start, end]` index range
/// into the sequence axis. Returns:
///
/// - span values of shape `[batch, num_spans, max_span_width, features]`,
///   where `max_span_width` is the widest span in the batch; positions past a
///   span's own width are zero,
/// - a boolean mask of shape `[batch, num_spans, max_span_width]`, true
///   exactly on positions covered by the span.
///
/// A span with `start > end` or either endpoint outside `[0, seq_len)` is an
/// error.
pub fn batched_span_select<T>(
    sequence: &Tensor<T>,
    spans: &Tensor<i64>,
) -> Result<(Tensor<T>, Tensor<bool>)>
where
    T: Clone + Zero,
{
    let seq_shape = sequence.shape();
    if seq_shape.rank() != 3 {
        return Err(TensorError::shape_mismatch(
            OP,
            "[batch, seq_len, features]",
            &seq_shape.to_string(),
        ));
    }
    let span_shape = spans.shape();
    if span_shape.rank() != 3 || span_shape[2] != 2 {
        return Err(TensorError::shape_mismatch(
            OP,
            "[batch, num_spans, 2]",
            &span_shape.to_string(),
        ));
    }
    if span_shape[0] != seq_shape[0] {
        return Err(TensorError::shape_mismatch(
            OP,
            &format!("batch size {}", seq_shape[0]),
            &format!("batch size {}", span_shape[0]),
        ));
    }

    let (batch, seq_len, features) = (seq_shape[0], seq_shape[1], seq_shape[2]);
    let num_spans = span_shape[1];

    let seq_data = sequence
        .as_slice()
        .ok_or_else(|| TensorError::invalid_argument(OP, "sequence tensor is not contiguous"))?;
    let span_data = spans
        .as_slice()
        .ok_or_else(|| TensorError::invalid_argument(OP, "span tensor is not contiguous"))?;

    // Validate every span and find the widest one before gathering.
    let mut bounds = Vec::with_capacity(batch * num_spans);
    let mut max_width = 0usize;
    for pair in span_data.chunks_exact(2) {
        let (start, end) = (pair[0], pair[1]);
        if start < 0 || end < 0 || start as usize >= seq_len || end as usize >= seq_len {
            return Err(TensorError::invalid_argument(
                OP,
                format!("span [{start}, {end}] out of bounds for sequence length {seq_len}"),
            ));
        }
        if start > end {
            return Err(TensorError::invalid_argument(
                OP,
                format!("span start {start} exceeds end {end}"),
            ));
        }
        let (start, end) = (start as usize, end as usize);
        max_width = max_width.max(end - start + 1);
        bounds.push((start, end));
    }

    let mut values = vec![T::zero(); batch * num_spans * max_width * features];
    let mut mask = vec![false; batch * num_spans * max_width];

    for b in 0..batch {
        for s in 0..num_spans {
            let (start, end) = bounds[b * num_spans + s];
            for k in 0..=(end - start) {
                let src = (b * seq_len + start + k) * features;
                let dst = ((b * num_spans + s) * max_width + k) * features;
                values[dst..dst + features].clone_from_slice(&seq_data[src..src + features]);
                mask[(b * num_spans + s) * max_width + k] = true;
            }
        }
    }

    let values = Tensor::from_vec(values, &[batch, num_spans, max_width, features])?;
    let mask = Tensor::from_vec(mask, &[batch, num_spans, max_width])?;
    Ok((values, mask))
}
