//! Pick (gather along an axis) trait.

use crate::error::Result;
use crate::ops::{OpReq, PickParam, backward_pick_shape, pick_shape, pick_type};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Pick elements along an axis with an index tensor, and its gradient scatter
pub trait PickOps<R: Runtime> {
    /// Write `data[.., index[c], ..]` for every coordinate `c` of `index` into `out`
    ///
    /// `index` must have `data`'s shape with the selected axis removed (or at
    /// size 1 under `keepdims`); `out` has that same shape and `data`'s dtype.
    /// Index values are truncated toward zero and resolved with `param.mode`.
    fn pick_into(
        &self,
        data: &Tensor<R>,
        index: &Tensor<R>,
        param: &PickParam,
        out: &Tensor<R>,
        req: OpReq,
    ) -> Result<()>;

    /// Scatter `ograd` into `grad` at the positions `index` selects
    ///
    /// `grad` has the forward data shape. Under `WriteTo` it is cleared first;
    /// contributions to a repeated cell are summed.
    fn pick_backward_into(
        &self,
        ograd: &Tensor<R>,
        index: &Tensor<R>,
        param: &PickParam,
        grad: &Tensor<R>,
        req: OpReq,
    ) -> Result<()>;

    /// Pick: gather one element per index coordinate along an axis.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // x = [[1, 2], [3, 4], [5, 6]], index = [0, 1, 0]
    /// let y = client.pick(&x, &index, &PickParam::axis(-1))?;
    /// assert_eq!(y.to_vec::<f32>(), [1.0, 4.0, 5.0]);
    /// ```
    fn pick(&self, data: &Tensor<R>, index: &Tensor<R>, param: &PickParam) -> Result<Tensor<R>> {
        let dtype = pick_type(data.dtype(), index.dtype(), "pick")?;
        let shape = pick_shape(data.shape(), index.shape(), param)?;
        let out = Tensor::try_zeros(&shape, dtype, data.device())?;
        self.pick_into(data, index, param, &out, OpReq::WriteTo)?;
        Ok(out)
    }

    /// Gradient of `pick` with respect to its data input.
    fn pick_backward(
        &self,
        ograd: &Tensor<R>,
        index: &Tensor<R>,
        param: &PickParam,
        data_shape: &[usize],
    ) -> Result<Tensor<R>> {
        let dtype = pick_type(ograd.dtype(), index.dtype(), "_backward_pick")?;
        let shape = backward_pick_shape(ograd.shape(), index.shape(), param, data_shape)?;
        let grad = Tensor::try_zeros(&shape, dtype, ograd.device())?;
        self.pick_backward_into(ograd, index, param, &grad, OpReq::WriteTo)?;
        Ok(grad)
    }
}
