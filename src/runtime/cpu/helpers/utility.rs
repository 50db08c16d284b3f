//! Fill and add helpers used by gradient bookkeeping nodes

use super::super::CpuRuntime;
use super::super::kernels;
use crate::dispatch_dtype;
use crate::dtype::{DType, Element};
use crate::error::Result;
use crate::ops::OpReq;
use crate::tensor::Tensor;

/// Fill `out` with `value` converted to its dtype
///
/// Bool tensors store 0 or 1.
pub fn fill_impl(out: &Tensor<CpuRuntime>, value: f64, req: OpReq) -> Result<()> {
    let len = out.numel();
    let out_addr = out.storage().ptr() as usize;

    if out.dtype() == DType::Bool {
        let byte = u8::from(value != 0.0);
        let req = if req == OpReq::AddTo && byte == 0 {
            OpReq::Null
        } else if req == OpReq::AddTo {
            OpReq::WriteTo
        } else {
            req
        };
        unsafe { kernels::fill_kernel::<u8>(out_addr as *mut u8, byte, req, len) };
        return Ok(());
    }

    dispatch_dtype!(out.dtype(), T => {
        unsafe { kernels::fill_kernel::<T>(out_addr as *mut T, T::from_f64(value), req, len) };
    }, "fill");

    Ok(())
}

/// `out (=|+=) a + b` over equally shaped tensors
pub fn add_impl(
    a: &Tensor<CpuRuntime>,
    b: &Tensor<CpuRuntime>,
    out: &Tensor<CpuRuntime>,
    req: OpReq,
) -> Result<()> {
    let len = out.numel();
    let a_addr = a.storage().ptr() as usize;
    let b_addr = b.storage().ptr() as usize;
    let out_addr = out.storage().ptr() as usize;

    dispatch_dtype!(out.dtype(), T => {
        unsafe {
            kernels::add_kernel::<T>(
                a_addr as *const T,
                b_addr as *const T,
                out_addr as *mut T,
                req,
                len,
            );
        }
    }, "add");

    Ok(())
}
