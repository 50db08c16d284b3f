//! Layout: the shape of a contiguous row-major tensor

use smallvec::SmallVec;

/// Ranks up to this many dimensions are kept inline
const INLINE_DIMS: usize = 4;

/// Dimensions of a tensor
pub type Shape = SmallVec<[usize; INLINE_DIMS]>;

/// Layout of a row-major (C-order) tensor
///
/// Selection kernels walk a flat buffer through its `[outer, axis_len, inner]`
/// decomposition around one axis (see [`split_at_axis`]), so pickr tensors
/// are always contiguous and the layout reduces to the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
}

impl Layout {
    /// Contiguous layout of `shape`
    ///
    /// # Example
    /// ```
    /// use pickr::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]);
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.elem_count(), 24);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        Self {
            shape: shape.iter().copied().collect(),
        }
    }

    /// The dimensions
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Rank
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements; 1 for a rank-0 layout
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Whether this is a rank-0 layout
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }
}

/// Split a shape around `axis` into `(outer, axis_len, inner)` extents
///
/// `outer` is the product of the dimensions before the axis and `inner` the
/// product of those after it. A row-major buffer of `shape` is then an
/// `[outer, axis_len, inner]` block.
pub fn split_at_axis(shape: &[usize], axis: usize) -> (usize, usize, usize) {
    let outer: usize = shape[..axis].iter().product();
    let inner: usize = shape[axis + 1..].iter().product();
    (outer, shape[axis], inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_zero_layout() {
        let layout = Layout::contiguous(&[]);
        assert!(layout.is_scalar());
        assert_eq!(layout.ndim(), 0);
        assert_eq!(layout.elem_count(), 1);
    }

    #[test]
    fn test_zero_sized_layout() {
        let layout = Layout::contiguous(&[3, 0, 2]);
        assert!(!layout.is_scalar());
        assert_eq!(layout.elem_count(), 0);
    }

    #[test]
    fn test_split_at_axis() {
        assert_eq!(split_at_axis(&[2, 3, 4], 0), (1, 2, 12));
        assert_eq!(split_at_axis(&[2, 3, 4], 1), (2, 3, 4));
        assert_eq!(split_at_axis(&[2, 3, 4], 2), (6, 4, 1));
        assert_eq!(split_at_axis(&[5], 0), (1, 5, 1));
    }
}
