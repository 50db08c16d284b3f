//! Pick forward / backward helpers

use super::super::kernels;
use super::super::{CpuClient, CpuRuntime};
use super::{for_each_outer, should_split};
use crate::dispatch_dtype;
use crate::error::{Error, Result};
use crate::ops::{AxisSplit, OpReq, PickMode};
use crate::tensor::Tensor;

/// Reject the first out-of-range index under [`PickMode::Raise`]
fn check_raise<I: crate::dtype::Element>(
    mode: PickMode,
    index_addr: usize,
    len: usize,
    axis_len: usize,
) -> Result<()> {
    if mode != PickMode::Raise {
        return Ok(());
    }
    // SAFETY: the index tensor holds `len` elements of type I.
    match unsafe { kernels::find_out_of_range::<I>(index_addr as *const I, len, axis_len) } {
        Some(index) => Err(Error::IndexOutOfBounds {
            index,
            size: axis_len,
        }),
        None => Ok(()),
    }
}

/// Gather `data` along `split` at the positions in `index` into `out`
#[allow(clippy::too_many_arguments)]
pub fn pick_impl(
    client: &CpuClient,
    data: &Tensor<CpuRuntime>,
    index: &Tensor<CpuRuntime>,
    split: AxisSplit,
    mode: PickMode,
    out: &Tensor<CpuRuntime>,
    req: OpReq,
) -> Result<()> {
    if req == OpReq::Null || split.orthogonal() == 0 {
        return Ok(());
    }

    let AxisSplit {
        outer,
        axis_len,
        inner,
    } = split;
    let data_addr = data.storage().ptr() as usize;
    let index_addr = index.storage().ptr() as usize;
    let out_addr = out.storage().ptr() as usize;

    dispatch_dtype!(data.dtype(), T => {
        dispatch_dtype!(index.dtype(), I => {
            check_raise::<I>(mode, index_addr, split.orthogonal(), axis_len)?;

            if !should_split(client, outer) {
                unsafe {
                    kernels::pick_forward_kernel::<T, I>(
                        data_addr as *const T,
                        index_addr as *const I,
                        out_addr as *mut T,
                        mode,
                        req,
                        outer,
                        axis_len,
                        inner,
                    );
                }
                return Ok(());
            }

            for_each_outer(client, outer, |o| unsafe {
                let data_ptr = data_addr as *const T;
                let index_ptr = index_addr as *const I;
                let out_ptr = out_addr as *mut T;
                kernels::pick_forward_row::<T, I>(
                    data_ptr.add(o * axis_len * inner),
                    index_ptr.add(o * inner),
                    out_ptr.add(o * inner),
                    mode,
                    req,
                    axis_len,
                    inner,
                );
            });
        }, "pick");
    }, "pick");

    Ok(())
}

/// Scatter `ograd` back along `split` at the positions in `index` into `grad`
///
/// Contributions landing on the same cell are summed. Each task owns one
/// outer row of `grad`, so concurrent tasks never share a cell.
#[allow(clippy::too_many_arguments)]
pub fn pick_backward_impl(
    client: &CpuClient,
    ograd: &Tensor<CpuRuntime>,
    index: &Tensor<CpuRuntime>,
    split: AxisSplit,
    mode: PickMode,
    grad: &Tensor<CpuRuntime>,
    req: OpReq,
) -> Result<()> {
    if req == OpReq::Null || split.orthogonal() == 0 {
        return Ok(());
    }

    let AxisSplit {
        outer,
        axis_len,
        inner,
    } = split;
    let ograd_addr = ograd.storage().ptr() as usize;
    let index_addr = index.storage().ptr() as usize;
    let grad_addr = grad.storage().ptr() as usize;

    dispatch_dtype!(ograd.dtype(), T => {
        dispatch_dtype!(index.dtype(), I => {
            check_raise::<I>(mode, index_addr, split.orthogonal(), axis_len)?;

            if !should_split(client, outer) {
                unsafe {
                    kernels::pick_backward_kernel::<T, I>(
                        ograd_addr as *const T,
                        index_addr as *const I,
                        grad_addr as *mut T,
                        mode,
                        req,
                        outer,
                        axis_len,
                        inner,
                    );
                }
                return Ok(());
            }

            for_each_outer(client, outer, |o| unsafe {
                let ograd_ptr = ograd_addr as *const T;
                let index_ptr = index_addr as *const I;
                let grad_ptr = grad_addr as *mut T;
                kernels::pick_backward_row::<T, I>(
                    ograd_ptr.add(o * inner),
                    index_ptr.add(o * inner),
                    grad_ptr.add(o * axis_len * inner),
                    mode,
                    req,
                    axis_len,
                    inner,
                );
            });
        }, "_backward_pick");
    }, "_backward_pick");

    Ok(())
}
