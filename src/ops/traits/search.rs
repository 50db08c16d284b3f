//! Axis extremum search trait.

use crate::error::Result;
use crate::ops::{OpReq, ReduceAxisParam, SearchKind, channel_shape, reduce_axis_shape, search_type};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Argmax / argmin along an axis
pub trait SearchOps<R: Runtime> {
    /// Write first-extremum positions of `a` into `out`
    ///
    /// Scans the reduced axis in increasing order and only moves on a strict
    /// improvement, so the lowest position among ties wins. Positions are
    /// stored in `a`'s element type; `out` must have the shape given by
    /// [`reduce_axis_shape`] and `a`'s dtype.
    fn search_axis_into(
        &self,
        kind: SearchKind,
        a: &Tensor<R>,
        param: &ReduceAxisParam,
        out: &Tensor<R>,
        req: OpReq,
    ) -> Result<()>;

    /// Compute entry point of `argmax`
    fn argmax_into(
        &self,
        a: &Tensor<R>,
        param: &ReduceAxisParam,
        out: &Tensor<R>,
        req: OpReq,
    ) -> Result<()> {
        self.search_axis_into(SearchKind::Max, a, param, out, req)
    }

    /// Compute entry point of `argmin`
    fn argmin_into(
        &self,
        a: &Tensor<R>,
        param: &ReduceAxisParam,
        out: &Tensor<R>,
        req: OpReq,
    ) -> Result<()> {
        self.search_axis_into(SearchKind::Min, a, param, out, req)
    }

    /// Compute entry point of `argmax_channel`: argmax over axis 1, no kept dim
    fn argmax_channel_into(&self, a: &Tensor<R>, out: &Tensor<R>, req: OpReq) -> Result<()> {
        channel_shape(a.shape())?;
        self.argmax_into(a, &ReduceAxisParam::channel(), out, req)
    }

    /// Argmax: position of the first maximum along an axis.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // x = [[0, 1, 2], [3, 4, 5]]
    /// let idx = client.argmax(&x, &ReduceAxisParam::axis(1))?;
    /// assert_eq!(idx.to_vec::<f32>(), [2.0, 2.0]);
    /// ```
    fn argmax(&self, a: &Tensor<R>, param: &ReduceAxisParam) -> Result<Tensor<R>> {
        let out = search_output(a, param, "argmax")?;
        self.argmax_into(a, param, &out, OpReq::WriteTo)?;
        Ok(out)
    }

    /// Argmin: position of the first minimum along an axis.
    fn argmin(&self, a: &Tensor<R>, param: &ReduceAxisParam) -> Result<Tensor<R>> {
        let out = search_output(a, param, "argmin")?;
        self.argmin_into(a, param, &out, OpReq::WriteTo)?;
        Ok(out)
    }

    /// Legacy channel argmax, identical to `argmax` with axis 1 and no kept dim.
    fn argmax_channel(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        channel_shape(a.shape())?;
        self.argmax(a, &ReduceAxisParam::channel())
    }
}

fn search_output<R: Runtime>(
    a: &Tensor<R>,
    param: &ReduceAxisParam,
    op: &'static str,
) -> Result<Tensor<R>> {
    let shape = reduce_axis_shape(a.shape(), param)?;
    let dtype = search_type(a.dtype(), a.shape(), param, op)?;
    Tensor::try_zeros(&shape, dtype, a.device())
}
