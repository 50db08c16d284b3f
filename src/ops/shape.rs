//! Shape and type inference for the selection operators
//!
//! Every function here is pure: it looks only at shapes, dtypes and
//! parameters, never at tensor data. The graph compiler runs them once per
//! node before anything executes, and the compute entry points rerun them to
//! validate the buffers they are handed.

use super::params::{PickParam, ReduceAxisParam};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::split_at_axis;

/// A tensor shape viewed as an `[outer, axis_len, inner]` block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSplit {
    /// Product of the dimensions before the axis
    pub outer: usize,
    /// Length of the axis
    pub axis_len: usize,
    /// Product of the dimensions after the axis
    pub inner: usize,
}

impl AxisSplit {
    /// Split `shape` around a normalized `axis`
    pub fn new(shape: &[usize], axis: usize) -> Self {
        let (outer, axis_len, inner) = split_at_axis(shape, axis);
        Self {
            outer,
            axis_len,
            inner,
        }
    }

    /// Treat the whole tensor as a single flattened axis
    pub fn flat(numel: usize) -> Self {
        Self {
            outer: 1,
            axis_len: numel,
            inner: 1,
        }
    }

    /// Number of orthogonal coordinates (`outer * inner`)
    #[inline]
    pub fn orthogonal(&self) -> usize {
        self.outer * self.inner
    }
}

/// Normalize a possibly negative axis against a rank
///
/// Accepts `axis` in `[-ndim, ndim)`; anything else is `InvalidDimension`.
pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    let rank = ndim as isize;
    let idx = if axis < 0 { rank + axis } else { axis };
    if idx >= 0 && idx < rank {
        Ok(idx as usize)
    } else {
        Err(Error::InvalidDimension { dim: axis, ndim })
    }
}

/// `shape` with `axis` removed, or kept at size 1
pub fn reduced_shape(shape: &[usize], axis: usize, keepdims: bool) -> Vec<usize> {
    if keepdims {
        shape
            .iter()
            .enumerate()
            .map(|(i, &s)| if i == axis { 1 } else { s })
            .collect()
    } else {
        shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &s)| s)
            .collect()
    }
}

fn non_empty_axis(shape: &[usize], axis: usize) -> Result<()> {
    if shape[axis] == 0 {
        return Err(Error::EmptyAxis {
            axis,
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

/// Output shape of `argmax` / `argmin`
///
/// With `axis = None` the result is a single index into the flattened
/// tensor: rank 0, or all ones of the input rank under `keepdims`.
pub fn reduce_axis_shape(shape: &[usize], param: &ReduceAxisParam) -> Result<Vec<usize>> {
    match param.axis {
        None => {
            if shape.iter().product::<usize>() == 0 {
                return Err(Error::EmptyAxis {
                    axis: 0,
                    shape: shape.to_vec(),
                });
            }
            Ok(if param.keepdims {
                vec![1; shape.len()]
            } else {
                Vec::new()
            })
        }
        Some(axis) => {
            let axis = normalize_axis(axis, shape.len())?;
            non_empty_axis(shape, axis)?;
            Ok(reduced_shape(shape, axis, param.keepdims))
        }
    }
}

/// Iteration geometry of an axis reduction over `shape`
pub fn reduce_axis_split(shape: &[usize], param: &ReduceAxisParam) -> Result<AxisSplit> {
    reduce_axis_shape(shape, param)?;
    Ok(match param.axis {
        None => AxisSplit::flat(shape.iter().product()),
        Some(axis) => AxisSplit::new(shape, normalize_axis(axis, shape.len())?),
    })
}

/// Output shape of `argmax_channel`
///
/// The legacy operator always reduces axis 1, so inputs need rank >= 2.
pub fn channel_shape(shape: &[usize]) -> Result<Vec<usize>> {
    if shape.len() < 2 {
        return Err(Error::InvalidDimension {
            dim: 1,
            ndim: shape.len(),
        });
    }
    reduce_axis_shape(shape, &ReduceAxisParam::channel())
}

/// Normalized selection axis of a pick over `data_shape`
pub fn pick_axis(data_shape: &[usize], param: &PickParam) -> Result<usize> {
    let axis = normalize_axis(param.axis.unwrap_or(-1), data_shape.len())?;
    non_empty_axis(data_shape, axis)?;
    Ok(axis)
}

/// Output shape of `pick`, validating the index shape
///
/// The index tensor must have the data shape with the selected axis removed
/// (or kept at size 1 under `keepdims`); the output has exactly that shape.
pub fn pick_shape(
    data_shape: &[usize],
    index_shape: &[usize],
    param: &PickParam,
) -> Result<Vec<usize>> {
    let axis = pick_axis(data_shape, param)?;
    let expected = reduced_shape(data_shape, axis, param.keepdims);
    if index_shape != expected.as_slice() {
        return Err(Error::shape_mismatch(&expected, index_shape));
    }
    Ok(expected)
}

/// Output shape of `_backward_pick`: the forward data shape
pub fn backward_pick_shape(
    ograd_shape: &[usize],
    index_shape: &[usize],
    param: &PickParam,
    data_shape: &[usize],
) -> Result<Vec<usize>> {
    let forward = pick_shape(data_shape, index_shape, param)?;
    if ograd_shape != forward.as_slice() {
        return Err(Error::shape_mismatch(&forward, ograd_shape));
    }
    Ok(data_shape.to_vec())
}

/// Output shape of an elementwise binary op without broadcasting
pub fn same_shape(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    if lhs != rhs {
        return Err(Error::shape_mismatch(lhs, rhs));
    }
    Ok(lhs.to_vec())
}

fn numeric(dtype: DType, op: &'static str) -> Result<DType> {
    if !dtype.is_numeric() {
        return Err(Error::unsupported_dtype(dtype, op));
    }
    Ok(dtype)
}

/// Output dtype of `argmax` / `argmin` / `argmax_channel`
///
/// Positions are stored in the element type of the input, so every position
/// the reduction over `shape` can produce must be exactly representable in
/// it (`IndexNotRepresentable` otherwise: a `u8` axis longer than 256, say).
pub fn search_type(
    dtype: DType,
    shape: &[usize],
    param: &ReduceAxisParam,
    op: &'static str,
) -> Result<DType> {
    numeric(dtype, op)?;
    let max_position = reduce_axis_split(shape, param)?.axis_len - 1;
    if max_position as u64 > dtype.max_exact_index() {
        return Err(Error::IndexNotRepresentable {
            op,
            dtype,
            max_position,
        });
    }
    Ok(dtype)
}

/// Output dtype of `pick` and `_backward_pick`
///
/// The result follows the data (or gradient) dtype. The index dtype is
/// independent but must be numeric.
pub fn pick_type(data: DType, index: DType, op: &'static str) -> Result<DType> {
    numeric(index, op)?;
    numeric(data, op)
}

/// Output dtype of an elementwise binary op: both operands must agree
pub fn same_type(lhs: DType, rhs: DType) -> Result<DType> {
    if lhs != rhs {
        return Err(Error::DTypeMismatch { lhs, rhs });
    }
    Ok(lhs)
}
