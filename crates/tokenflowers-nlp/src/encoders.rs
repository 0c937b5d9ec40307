//! Sequence encoders.
//!
//! A [`SeqEncoder`] transforms a `[batch, steps, dim]` sequence of vectors
//! into another sequence of the same length, given a `[batch, steps]` validity
//! mask. Embedders apply one between embedding lookup and pooling to
//! contextualize wordpiece vectors.

use num_traits::{Float, FromPrimitive};
use tokenflowers_core::{Result, Tensor, TensorError};

pub trait SeqEncoder<T>: Send + Sync {
    /// Feature width this encoder expects on its input.
    fn input_dim(&self) -> usize;

    /// Feature width of the encoded output.
    fn output_dim(&self) -> usize;

    /// Encode a `[batch, steps, input_dim]` sequence. Positions where `mask`
    /// is false are padding.
    fn forward(&self, inputs: &Tensor<T>, mask: &Tensor<bool>) -> Result<Tensor<T>>;

    fn clone_box(&self) -> Box<dyn SeqEncoder<T>>;

    /// Owned weight tensors, empty for stateless encoders.
    fn parameters(&self) -> Vec<&Tensor<T>> {
        Vec::new()
    }
}

impl<T> Clone for Box<dyn SeqEncoder<T>> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

fn check_sequence_inputs(
    operation: &str,
    inputs: &Tensor<impl Clone>,
    mask: &Tensor<bool>,
    input_dim: usize,
) -> Result<(usize, usize)> {
    let in_shape = inputs.shape();
    if in_shape.rank() != 3 || in_shape[2] != input_dim {
        return Err(TensorError::shape_mismatch(
            operation,
            &format!("[batch, steps, {input_dim}]"),
            &in_shape.to_string(),
        ));
    }
    let mask_shape = mask.shape();
    if mask_shape.dims() != &in_shape.dims()[..2] {
        return Err(TensorError::shape_mismatch(
            operation,
            &format!("mask [{}, {}]", in_shape[0], in_shape[1]),
            &mask_shape.to_string(),
        ));
    }
    Ok((in_shape[0], in_shape[1]))
}

/// Identity encoder: returns its input unchanged.
///
/// Stands in where a configuration leaves the encoder slot empty but a
/// concrete `SeqEncoder` value is required.
#[derive(Debug, Clone)]
pub struct PassThroughEncoder {
    dim: usize,
}

impl PassThroughEncoder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl<T> SeqEncoder<T> for PassThroughEncoder
where
    T: Clone + Send + Sync + 'static,
{
    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        self.dim
    }

    fn forward(&self, inputs: &Tensor<T>, mask: &Tensor<bool>) -> Result<Tensor<T>> {
        check_sequence_inputs("pass_through_forward", inputs, mask, self.dim)?;
        Ok(inputs.clone())
    }

    fn clone_box(&self) -> Box<dyn SeqEncoder<T>> {
        Box::new(self.clone())
    }
}

/// Position-wise linear projection over the feature axis.
///
/// Each step is projected independently; padded steps produce zero vectors.
#[derive(Debug, Clone)]
pub struct FeedForwardEncoder<T> {
    weight: Tensor<T>,
    bias: Tensor<T>,
    input_dim: usize,
    output_dim: usize,
}

impl<T> FeedForwardEncoder<T>
where
    T: Float + FromPrimitive + Send + Sync + 'static,
{
    /// Create a projection with deterministically initialized weights.
    pub fn new(input_dim: usize, output_dim: usize) -> Result<Self> {
        let limit = (6.0 / (input_dim + output_dim).max(1) as f32).sqrt();
        let data = (0..input_dim * output_dim)
            .map(|i| {
                let v = ((i as f32 + 1.0) * 0.618_034).sin() * limit;
                T::from_f32(v).unwrap_or_else(T::zero)
            })
            .collect();
        let weight = Tensor::from_vec(data, &[input_dim, output_dim])?;
        let bias = Tensor::zeros(&[output_dim]);
        Ok(Self {
            weight,
            bias,
            input_dim,
            output_dim,
        })
    }

    /// Create a projection from existing weights.
    pub fn from_weights(weight: Tensor<T>, bias: Tensor<T>) -> Result<Self> {
        const OP: &str = "feed_forward_encoder";
        let w_shape = weight.shape();
        if w_shape.rank() != 2 {
            return Err(TensorError::shape_mismatch(
                OP,
                "[input_dim, output_dim]",
                &w_shape.to_string(),
            ));
        }
        let (input_dim, output_dim) = (w_shape[0], w_shape[1]);
        if bias.shape().dims() != [output_dim] {
            return Err(TensorError::shape_mismatch(
                OP,
                &format!("bias [{output_dim}]"),
                &bias.shape().to_string(),
            ));
        }
        Ok(Self {
            weight,
            bias,
            input_dim,
            output_dim,
        })
    }
}

impl<T> SeqEncoder<T> for FeedForwardEncoder<T>
where
    T: Float + FromPrimitive + Send + Sync + 'static,
{
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn output_dim(&self) -> usize {
        self.output_dim
    }

    fn forward(&self, inputs: &Tensor<T>, mask: &Tensor<bool>) -> Result<Tensor<T>> {
        const OP: &str = "feed_forward_forward";
        let (batch, steps) = check_sequence_inputs(OP, inputs, mask, self.input_dim)?;

        let in_data = inputs
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "input tensor is not contiguous"))?;
        let mask_data = mask
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "mask tensor is not contiguous"))?;
        let w = self
            .weight
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "weight tensor is not contiguous"))?;
        let b = self
            .bias
            .as_slice()
            .ok_or_else(|| TensorError::invalid_argument(OP, "bias tensor is not contiguous"))?;

        let (in_dim, out_dim) = (self.input_dim, self.output_dim);
        let mut out = vec![T::zero(); batch * steps * out_dim];
        for pos in 0..batch * steps {
            if !mask_data[pos] {
                continue;
            }
            let src = pos * in_dim;
            let dst = pos * out_dim;
            for (o, out_val) in out[dst..dst + out_dim].iter_mut().enumerate() {
                let mut acc = b[o];
                for i in 0..in_dim {
                    acc = acc + in_data[src + i] * w[i * out_dim + o];
                }
                *out_val = acc;
            }
        }

        Tensor::from_vec(out, &[batch, steps, out_dim])
    }

    fn clone_box(&self) -> Box<dyn SeqEncoder<T>> {
        Box::new(self.clone())
    }

    fn parameters(&self) -> Vec<&Tensor<T>> {
        vec![&self.weight, &self.bias]
    }
}
