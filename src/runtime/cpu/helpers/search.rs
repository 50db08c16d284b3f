//! Argmax / argmin helpers

use super::super::kernels;
use super::super::{CpuClient, CpuRuntime};
use super::{for_each_outer, should_split};
use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::{AxisSplit, OpReq, SearchKind};
use crate::tensor::Tensor;

/// Write the first-extremum positions of `a` along `split` into `out`
///
/// `out` must hold `split.orthogonal()` elements of `a`'s dtype.
pub fn search_axis_impl(
    client: &CpuClient,
    kind: SearchKind,
    a: &Tensor<CpuRuntime>,
    split: AxisSplit,
    out: &Tensor<CpuRuntime>,
    req: OpReq,
    op: &'static str,
) -> Result<()> {
    if req == OpReq::Null || split.orthogonal() == 0 {
        return Ok(());
    }

    let AxisSplit {
        outer,
        axis_len,
        inner,
    } = split;
    let a_addr = a.storage().ptr() as usize;
    let out_addr = out.storage().ptr() as usize;

    dispatch_dtype!(a.dtype(), T => {
        if !should_split(client, outer) {
            unsafe {
                kernels::search_axis_kernel::<T>(
                    a_addr as *const T,
                    out_addr as *mut T,
                    kind,
                    req,
                    outer,
                    axis_len,
                    inner,
                );
            }
            return Ok(());
        }

        for_each_outer(client, outer, |o| unsafe {
            let a_ptr = a_addr as *const T;
            let out_ptr = out_addr as *mut T;
            kernels::search_axis_row::<T>(
                a_ptr.add(o * axis_len * inner),
                out_ptr.add(o * inner),
                kind,
                req,
                axis_len,
                inner,
            );
        });
    }, op);

    Ok(())
}
