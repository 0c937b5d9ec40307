use crate::{Result, Tensor, TensorError};
use ndarray::Axis;
use num_traits::{FromPrimitive, Zero};

/// Sum reduction along one axis.
///
/// With `keepdims` the reduced axis is kept with size 1, otherwise it is
/// removed from the result shape.
pub fn sum_axis<T>(x: &Tensor<T>, axis: usize, keepdims: bool) -> Result<Tensor<T>>
where
    T: Clone + Zero,
{
    let rank = x.rank();
    if axis >= rank {
        return Err(TensorError::invalid_axis("sum_axis", axis, rank));
    }

    let mut result = x.array().sum_axis(Axis(axis));
    if keepdims {
        result = result.insert_axis(Axis(axis));
    }
    Ok(Tensor::from_array(result))
}

/// Mean reduction along one axis.
pub fn mean_axis<T>(x: &Tensor<T>, axis: usize, keepdims: bool) -> Result<Tensor<T>>
where
    T: Clone + Zero + FromPrimitive + std::ops::Div<Output = T>,
{
    let rank = x.rank();
    if axis >= rank {
        return Err(TensorError::invalid_axis("mean_axis", axis, rank));
    }

    let mut result = x
        .array()
        .mean_axis(Axis(axis))
        .ok_or_else(|| TensorError::invalid_argument("mean_axis", "axis has zero length"))?;
    if keepdims {
        result = result.insert_axis(Axis(axis));
    }
    Ok(Tensor::from_array(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_axis() -> Result<()> {
        let x = Tensor::from_vec(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;

        let rows = sum_axis(&x, 1, false)?;
        assert_eq!(rows.shape().dims(), &[2]);
        assert_eq!(rows.as_slice(), Some(&[6.0, 15.0][..]));

        let cols = sum_axis(&x, 0, false)?;
        assert_eq!(cols.as_slice(), Some(&[5.0, 7.0, 9.0][..]));

        Ok(())
    }

    #[test]
    fn test_sum_axis_keepdims() -> Result<()> {
        let x = Tensor::from_vec(vec![1.0f32, 2.0, 3.0, 4.0], &[2, 2])?;
        let summed = sum_axis(&x, 1, true)?;
        assert_eq!(summed.shape().dims(), &[2, 1]);
        Ok(())
    }

    #[test]
    fn test_mean_axis() -> Result<()> {
        let x = Tensor::from_vec(vec![1.0f32, 3.0, 2.0, 6.0], &[2, 2])?;
        let mean = mean_axis(&x, 1, false)?;
        assert_eq!(mean.as_slice(), Some(&[2.0, 4.0][..]));
        Ok(())
    }

    #[test]
    fn test_mean_axis_fractional() -> Result<()> {
        use approx::assert_relative_eq;

        let x = Tensor::from_vec(vec![0.1f32, 0.2, 0.3], &[1, 3])?;
        let mean = mean_axis(&x, 1, false)?;
        assert_relative_eq!(mean.as_slice().unwrap()[0], 0.2, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_axis_out_of_range() {
        let x = Tensor::<f32>::zeros(&[2, 2]);
        let err = sum_axis(&x, 2, false);
        assert!(matches!(err, Err(TensorError::InvalidAxis { .. })));
    }
}
