use thiserror::Error;

/// Error type shared by all TokenfloweRS crates.
///
/// Every variant carries the name of the operation that raised it so that
/// failures deep inside a forward pass remain attributable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("Shape mismatch in operation '{operation}': expected {expected}, got {got}")]
    ShapeMismatch {
        operation: String,
        expected: String,
        got: String,
    },

    #[error("Invalid shape in operation '{operation}': {reason}")]
    InvalidShape { operation: String, reason: String },

    #[error("Invalid argument in operation '{operation}': {reason}")]
    InvalidArgument { operation: String, reason: String },

    #[error("Invalid axis {axis} in operation '{operation}' for tensor with {rank} dimensions")]
    InvalidAxis {
        operation: String,
        axis: usize,
        rank: usize,
    },

    #[error("Resource error in operation '{operation}' for '{path}': {details}")]
    ResourceError {
        operation: String,
        path: String,
        details: String,
    },
}

impl TensorError {
    pub fn shape_mismatch(operation: &str, expected: &str, got: &str) -> Self {
        TensorError::ShapeMismatch {
            operation: operation.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    pub fn invalid_shape(operation: &str, reason: impl Into<String>) -> Self {
        TensorError::InvalidShape {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(operation: &str, reason: impl Into<String>) -> Self {
        TensorError::InvalidArgument {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_axis(operation: &str, axis: usize, rank: usize) -> Self {
        TensorError::InvalidAxis {
            operation: operation.to_string(),
            axis,
            rank,
        }
    }

    pub fn resource_error(
        operation: &str,
        path: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        TensorError::ResourceError {
            operation: operation.to_string(),
            path: path.into(),
            details: details.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TensorError>;
