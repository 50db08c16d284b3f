//! Fill kernels

use crate::dtype::Element;
use crate::ops::OpReq;

/// Fill `len` elements starting at `out` with `value`
///
/// # Safety
/// - `out` must be valid for `len` writes (it may be dangling when `len` is 0)
#[inline]
pub unsafe fn fill_row<T: Element>(out: *mut T, value: T, len: usize) {
    if len == 0 {
        return;
    }
    std::slice::from_raw_parts_mut(out, len).fill(value);
}

/// Fill a buffer with a constant, or add the constant to it under `AddTo`
///
/// # Safety
/// - `out` must be valid for `len` reads and writes
#[inline]
pub unsafe fn fill_kernel<T: Element>(out: *mut T, value: T, req: OpReq, len: usize) {
    if len == 0 {
        return;
    }
    let out = std::slice::from_raw_parts_mut(out, len);
    match req {
        OpReq::Null => {}
        OpReq::WriteTo => out.fill(value),
        OpReq::AddTo => out.iter_mut().for_each(|o| *o = *o + value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill() {
        let mut buf = [0.0f32; 4];
        unsafe { fill_kernel(buf.as_mut_ptr(), 2.5, OpReq::WriteTo, 4) };
        assert_eq!(buf, [2.5; 4]);
        unsafe { fill_kernel(buf.as_mut_ptr(), 1.0, OpReq::AddTo, 2) };
        unsafe { fill_kernel(buf.as_mut_ptr(), 7.0, OpReq::Null, 4) };
        assert_eq!(buf, [3.5, 3.5, 2.5, 2.5]);
        unsafe { fill_row(std::ptr::null_mut::<f32>(), 1.0, 0) };
    }
}
