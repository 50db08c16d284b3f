//! Utility operations used for gradient bookkeeping.

use crate::error::Result;
use crate::ops::{OpReq, same_shape, same_type};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Constant fills and elementwise sums
pub trait UtilityOps<R: Runtime> {
    /// Fill `out` with `value` (or add it under `AddTo`)
    fn fill_into(&self, out: &Tensor<R>, value: f64, req: OpReq) -> Result<()>;

    /// Write `a + b` into `out`; all three must share shape and dtype
    fn add_into(&self, a: &Tensor<R>, b: &Tensor<R>, out: &Tensor<R>, req: OpReq) -> Result<()>;

    /// Zero tensor with the shape and dtype of `a`
    fn zeros_like(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        Tensor::zeros_like(a)
    }

    /// Tensor of ones with the shape and dtype of `a`
    fn ones_like(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        let out = Tensor::try_zeros(a.shape(), a.dtype(), a.device())?;
        self.fill_into(&out, 1.0, OpReq::WriteTo)?;
        Ok(out)
    }

    /// Elementwise sum without broadcasting
    fn add(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        let shape = same_shape(a.shape(), b.shape())?;
        let dtype = same_type(a.dtype(), b.dtype())?;
        let out = Tensor::try_zeros(&shape, dtype, a.device())?;
        self.add_into(a, b, &out, OpReq::WriteTo)?;
        Ok(out)
    }
}
