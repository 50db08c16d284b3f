//! Axis extremum search kernels (argmax / argmin)

use super::store;
use crate::dtype::Element;
use crate::ops::{OpReq, SearchKind};

/// Search one outer row of an `[outer, axis_len, inner]` block
///
/// For every `i < inner`, scans `a[r * inner + i]` for `r` in increasing
/// order and stores the position of the first extremum at `out[i]`.
///
/// # Safety
/// - `a` must point to `axis_len * inner` elements
/// - `out` must point to `inner` elements
/// - `axis_len` must be non-zero
#[inline]
pub unsafe fn search_axis_row<T: Element>(
    a: *const T,
    out: *mut T,
    kind: SearchKind,
    req: OpReq,
    axis_len: usize,
    inner: usize,
) {
    for i in 0..inner {
        let mut best = *a.add(i);
        let mut best_idx = 0usize;

        for r in 1..axis_len {
            let val = *a.add(r * inner + i);
            if kind.improves(val, best) {
                best = val;
                best_idx = r;
            }
        }

        store(out.add(i), T::from_index(best_idx), req);
    }
}

/// Search every row of an `[outer, axis_len, inner]` block
///
/// Writes `outer * inner` positions, stored in the element type of `a`.
///
/// # Safety
/// - `a` must point to `outer * axis_len * inner` elements
/// - `out` must point to `outer * inner` elements
/// - `axis_len` must be non-zero
#[inline]
pub unsafe fn search_axis_kernel<T: Element>(
    a: *const T,
    out: *mut T,
    kind: SearchKind,
    req: OpReq,
    outer: usize,
    axis_len: usize,
    inner: usize,
) {
    for o in 0..outer {
        search_axis_row(
            a.add(o * axis_len * inner),
            out.add(o * inner),
            kind,
            req,
            axis_len,
            inner,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(data: &[f32], kind: SearchKind, outer: usize, axis_len: usize, inner: usize) -> Vec<f32> {
        let mut out = vec![0.0f32; outer * inner];
        unsafe {
            search_axis_kernel(
                data.as_ptr(),
                out.as_mut_ptr(),
                kind,
                OpReq::WriteTo,
                outer,
                axis_len,
                inner,
            );
        }
        out
    }

    #[test]
    fn test_search_axis_inner() {
        // [[0, 1, 2], [3, 4, 5]] along axis 0
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(search(&data, SearchKind::Max, 1, 2, 3), vec![1.0, 1.0, 1.0]);
        assert_eq!(search(&data, SearchKind::Min, 1, 2, 3), vec![0.0, 0.0, 0.0]);
        // along axis 1
        assert_eq!(search(&data, SearchKind::Max, 2, 3, 1), vec![2.0, 2.0]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let data = [1.0, 7.0, 7.0, 0.0, -2.0, -2.0];
        assert_eq!(search(&data, SearchKind::Max, 1, 6, 1), vec![1.0]);
        assert_eq!(search(&data, SearchKind::Min, 1, 6, 1), vec![4.0]);
    }

    #[test]
    fn test_add_to_accumulates() {
        let data = [3i32, 9, 1];
        let mut out = [10i32];
        unsafe {
            search_axis_kernel(
                data.as_ptr(),
                out.as_mut_ptr(),
                SearchKind::Max,
                OpReq::AddTo,
                1,
                3,
                1,
            );
        }
        assert_eq!(out, [11]);

        unsafe {
            search_axis_kernel(
                data.as_ptr(),
                out.as_mut_ptr(),
                SearchKind::Min,
                OpReq::Null,
                1,
                3,
                1,
            );
        }
        assert_eq!(out, [11]);
    }
}
