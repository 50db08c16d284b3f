//! Pick kernels: gather along an axis and the matching backward scatter

use super::store;
use crate::dtype::Element;
use crate::ops::{OpReq, PickMode};

/// Find the first index value outside `[0, axis_len)`
///
/// Used to reject a whole computation under [`PickMode::Raise`] before any
/// output is written.
///
/// # Safety
/// - `index` must point to `len` elements
#[inline]
pub unsafe fn find_out_of_range<I: Element>(
    index: *const I,
    len: usize,
    axis_len: usize,
) -> Option<i64> {
    (0..len)
        .map(|i| (*index.add(i)).to_index())
        .find(|&raw| raw < 0 || raw >= axis_len as i64)
}

/// Gather one outer row: `out[i] = data[k * inner + i]`, `k = index[i]`
///
/// # Safety
/// - `data` must point to `axis_len * inner` elements
/// - `index` and `out` must point to `inner` elements
/// - `axis_len` must be non-zero
#[inline]
pub unsafe fn pick_forward_row<T: Element, I: Element>(
    data: *const T,
    index: *const I,
    out: *mut T,
    mode: PickMode,
    req: OpReq,
    axis_len: usize,
    inner: usize,
) {
    for i in 0..inner {
        let k = mode.resolve((*index.add(i)).to_index(), axis_len);
        store(out.add(i), *data.add(k * inner + i), req);
    }
}

/// Gather along the axis of an `[outer, axis_len, inner]` data block
///
/// # Safety
/// - `data` must point to `outer * axis_len * inner` elements
/// - `index` and `out` must point to `outer * inner` elements
/// - `axis_len` must be non-zero
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn pick_forward_kernel<T: Element, I: Element>(
    data: *const T,
    index: *const I,
    out: *mut T,
    mode: PickMode,
    req: OpReq,
    outer: usize,
    axis_len: usize,
    inner: usize,
) {
    for o in 0..outer {
        pick_forward_row(
            data.add(o * axis_len * inner),
            index.add(o * inner),
            out.add(o * inner),
            mode,
            req,
            axis_len,
            inner,
        );
    }
}

/// Scatter one outer row: `grad[k * inner + i] += ograd[i]`, `k = index[i]`
///
/// Under `WriteTo` the row is zeroed first; under `AddTo` contributions are
/// added to the existing contents. Repeated targets always sum.
///
/// # Safety
/// - `grad` must point to `axis_len * inner` elements
/// - `ograd` and `index` must point to `inner` elements
/// - `axis_len` must be non-zero
#[inline]
pub unsafe fn pick_backward_row<T: Element, I: Element>(
    ograd: *const T,
    index: *const I,
    grad: *mut T,
    mode: PickMode,
    req: OpReq,
    axis_len: usize,
    inner: usize,
) {
    match req {
        OpReq::Null => return,
        OpReq::WriteTo => super::fill_row(grad, T::zero(), axis_len * inner),
        OpReq::AddTo => {}
    }

    for i in 0..inner {
        let k = mode.resolve((*index.add(i)).to_index(), axis_len);
        let dst = grad.add(k * inner + i);
        *dst = *dst + *ograd.add(i);
    }
}

/// Scatter an upstream gradient back onto an `[outer, axis_len, inner]` block
///
/// # Safety
/// - `grad` must point to `outer * axis_len * inner` elements
/// - `ograd` and `index` must point to `outer * inner` elements
/// - `axis_len` must be non-zero
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn pick_backward_kernel<T: Element, I: Element>(
    ograd: *const T,
    index: *const I,
    grad: *mut T,
    mode: PickMode,
    req: OpReq,
    outer: usize,
    axis_len: usize,
    inner: usize,
) {
    for o in 0..outer {
        pick_backward_row(
            ograd.add(o * inner),
            index.add(o * inner),
            grad.add(o * axis_len * inner),
            mode,
            req,
            axis_len,
            inner,
        );
    }
}
