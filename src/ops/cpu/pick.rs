//! CPU implementation of pick operations.

use crate::error::{Error, Result};
use crate::ops::{
    AxisSplit, OpReq, PickOps, PickParam, backward_pick_shape, pick_axis, pick_shape, pick_type,
    traits::check_output,
};
use crate::runtime::cpu::{
    CpuClient, CpuRuntime,
    helpers::{pick_backward_impl, pick_impl},
};
use crate::tensor::Tensor;

/// PickOps implementation for CPU runtime.
impl PickOps<CpuRuntime> for CpuClient {
    fn pick_into(
        &self,
        data: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
        param: &PickParam,
        out: &Tensor<CpuRuntime>,
        req: OpReq,
    ) -> Result<()> {
        let dtype = pick_type(data.dtype(), index.dtype(), "pick")?;
        let out_shape = pick_shape(data.shape(), index.shape(), param)?;
        check_output(out, &out_shape, dtype)?;

        let split = AxisSplit::new(data.shape(), pick_axis(data.shape(), param)?);
        pick_impl(self, data, index, split, param.mode, out, req)
    }

    fn pick_backward_into(
        &self,
        ograd: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
        param: &PickParam,
        grad: &Tensor<CpuRuntime>,
        req: OpReq,
    ) -> Result<()> {
        let dtype = pick_type(ograd.dtype(), index.dtype(), "_backward_pick")?;
        let data_shape = grad.shape();
        backward_pick_shape(ograd.shape(), index.shape(), param, data_shape)?;
        if grad.dtype() != dtype {
            return Err(Error::DTypeMismatch {
                lhs: dtype,
                rhs: grad.dtype(),
            });
        }

        let split = AxisSplit::new(data_shape, pick_axis(data_shape, param)?);
        pick_backward_impl(self, ograd, index, split, param.mode, grad, req)
    }
}
