use crate::Shape;
use ndarray::ArrayD;

/// Dense CPU tensor.
///
/// Data lives in an `ndarray::ArrayD`; `requires_grad` marks whether the
/// tensor's values are updatable parameters. The marker is metadata for the
/// surrounding training loop, it does not change any computation here.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    pub(in crate::tensor) data: ArrayD<T>,
    pub(in crate::tensor) requires_grad: bool,
}

impl<T> Tensor<T> {
    /// Shape of the tensor.
    pub fn shape(&self) -> Shape {
        Shape::from_slice(self.data.shape())
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Underlying data in row-major order, if contiguous.
    pub fn as_slice(&self) -> Option<&[T]> {
        self.data.as_slice()
    }

    /// Value at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<T>
    where
        T: Clone,
    {
        if index.len() != self.data.ndim() {
            return None;
        }
        self.data.get(index).cloned()
    }

    /// Borrow the backing array.
    pub fn array(&self) -> &ArrayD<T> {
        &self.data
    }

    /// Consume the tensor, returning the backing array.
    pub fn into_array(self) -> ArrayD<T> {
        self.data
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub fn set_requires_grad(&mut self, requires_grad: bool) {
        self.requires_grad = requires_grad;
    }
}
