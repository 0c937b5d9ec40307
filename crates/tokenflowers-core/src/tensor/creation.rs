use super::core::Tensor;
use crate::{Result, TensorError};
use ndarray::{ArrayD, IxDyn};
use num_traits::{One, Zero};

impl<T: Clone> Tensor<T> {
    /// Create a tensor filled with zeros.
    pub fn zeros(shape: &[usize]) -> Self
    where
        T: Zero,
    {
        Self::from_array(ArrayD::zeros(IxDyn(shape)))
    }

    /// Create a tensor filled with ones.
    pub fn ones(shape: &[usize]) -> Self
    where
        T: One,
    {
        Self::from_array(ArrayD::ones(IxDyn(shape)))
    }

    /// Create a tensor filled with a specific value.
    pub fn full(shape: &[usize], value: T) -> Self {
        Self::from_array(ArrayD::from_elem(IxDyn(shape), value))
    }

    /// Create a tensor from a data vector with the given shape.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let total: usize = shape.iter().product();
        if data.len() != total {
            return Err(TensorError::invalid_shape(
                "from_vec",
                format!(
                    "data length {} does not match shape {:?} ({} elements)",
                    data.len(),
                    shape,
                    total
                ),
            ));
        }

        let array = ArrayD::from_shape_vec(IxDyn(shape), data)
            .map_err(|e| TensorError::invalid_shape("from_vec", e.to_string()))?;
        Ok(Self::from_array(array))
    }

    /// Create a tensor from an existing ndarray.
    pub fn from_array(array: ArrayD<T>) -> Self {
        Self {
            data: array,
            requires_grad: false,
        }
    }

    /// Create a scalar tensor from a single value.
    pub fn from_scalar(value: T) -> Self {
        Self::from_array(ArrayD::from_elem(IxDyn(&[]), value))
    }
}
