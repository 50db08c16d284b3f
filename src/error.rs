//! Error types for pickr

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using pickr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, inferring or executing selection operators
///
/// Shape, axis and dtype errors are raised by the inference stage before any
/// tensor data is touched. `IndexOutOfBounds` is the only data-dependent error
/// and is reported solely under [`crate::ops::PickMode::Raise`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Invalid dimension index (axis outside `[-ndim, ndim)`)
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: isize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Reduction or selection along an axis of length zero
    #[error("Axis {axis} of shape {shape:?} has zero length")]
    EmptyAxis {
        /// The normalized axis
        axis: usize,
        /// Shape of the input tensor
        shape: Vec<usize>,
    },

    /// Positions along a reduced axis that the output dtype cannot store exactly
    #[error(
        "Operation '{op}' cannot store positions up to {max_position} in {dtype} (exact up to {})",
        .dtype.max_exact_index()
    )]
    IndexNotRepresentable {
        /// The operation name
        op: &'static str,
        /// Output dtype holding the positions
        dtype: DType,
        /// Largest position the reduction can produce
        max_position: usize,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Expected dtype
        lhs: DType,
        /// Actual dtype
        rhs: DType,
    },

    /// Index value out of bounds (raised only when the pick mode asks for it)
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: i64,
        /// Size of the dimension
        size: usize,
    },

    /// Operator name is not present in the registry
    #[error("Unknown operator '{name}'")]
    UnknownOperator {
        /// The requested operator name
        name: String,
    },

    /// Wrong number of inputs for an operator
    #[error("Operator '{op}' expects {expected} inputs, got {got}")]
    ArityMismatch {
        /// The operator name
        op: &'static str,
        /// Expected input count
        expected: usize,
        /// Actual input count
        got: usize,
    },

    /// Node id does not belong to the graph
    #[error("Unknown node {0}")]
    UnknownNode(usize),

    /// A graph variable was not bound to a tensor before execution
    #[error("Missing input for variable '{name}'")]
    MissingInput {
        /// Variable name
        name: String,
    },

    /// Gradient requested through an operator that has no gradient rule
    #[error("Operator '{op}' is not differentiable")]
    NotDifferentiable {
        /// The operator name
        op: &'static str,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create an arity error
    pub fn arity(op: &'static str, expected: usize, got: usize) -> Self {
        Self::ArityMismatch { op, expected, got }
    }

    /// Whether this error belongs to the static inference stage
    ///
    /// Inference errors are fatal to graph construction; everything else
    /// surfaces while binding or executing a graph.
    pub fn is_inference_error(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. }
                | Self::InvalidDimension { .. }
                | Self::EmptyAxis { .. }
                | Self::UnsupportedDType { .. }
                | Self::DTypeMismatch { .. }
                | Self::IndexNotRepresentable { .. }
        )
    }
}
