//! Elementwise addition kernels

use super::store;
use crate::dtype::Element;
use crate::ops::OpReq;

/// `out[i] (=|+=) a[i] + b[i]` for `i < len`
///
/// # Safety
/// - `a`, `b` and `out` must point to `len` elements
/// - `out` may alias `a` or `b` only under `WriteTo`
#[inline]
pub unsafe fn add_row<T: Element>(a: *const T, b: *const T, out: *mut T, req: OpReq, len: usize) {
    for i in 0..len {
        store(out.add(i), *a.add(i) + *b.add(i), req);
    }
}

/// Elementwise sum of two equally shaped buffers
///
/// # Safety
/// - see [`add_row`]
#[inline]
pub unsafe fn add_kernel<T: Element>(a: *const T, b: *const T, out: *mut T, req: OpReq, len: usize) {
    if req == OpReq::Null {
        return;
    }
    add_row(a, b, out, req, len);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let a = [1i64, 2, 3];
        let b = [10i64, 20, 30];
        let mut out = [100i64; 3];
        unsafe { add_kernel(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), OpReq::WriteTo, 3) };
        assert_eq!(out, [11, 22, 33]);
        unsafe { add_kernel(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), OpReq::AddTo, 3) };
        assert_eq!(out, [22, 44, 66]);
    }
}
