//! Gradient rules of the built-in operators

use super::{GradBuilder, GradContext};
use crate::error::Result;
use crate::graph::NodeId;
use crate::ops::OpAttrs;
use crate::runtime::Runtime;

/// Every input gets a zero gradient
///
/// Used for the hard selections (`argmax`, `argmin`, `argmax_channel`) and
/// the constant fills. Only the inputs' shapes and dtypes are consumed, so
/// the rule never depends on forward activations.
pub(crate) fn zero_gradient<R: Runtime>(
    b: &mut GradBuilder<'_, R>,
    ctx: &GradContext,
) -> Result<Vec<NodeId>> {
    ctx.inputs.iter().map(|&x| b.zeros_like(x)).collect()
}

/// `pick(data, index)`: scatter the upstream gradient back onto `data`
///
/// The index input is not differentiable and gets a zero gradient.
pub(crate) fn pick_gradient<R: Runtime>(
    b: &mut GradBuilder<'_, R>,
    ctx: &GradContext,
) -> Result<Vec<NodeId>> {
    let (data, index) = (ctx.inputs[0], ctx.inputs[1]);
    let param = *ctx.attrs.pick()?;
    let data_shape = b.shape(data)?.to_vec();

    let data_grad = b.op(
        "_backward_pick",
        &[ctx.ograd, index],
        OpAttrs::BackwardPick { param, data_shape },
    )?;
    let index_grad = b.zeros_like(index)?;
    Ok(vec![data_grad, index_grad])
}

/// `_grad_add(lhs, rhs)`: both inputs receive the upstream gradient
pub(crate) fn pass_through_gradient<R: Runtime>(
    _b: &mut GradBuilder<'_, R>,
    ctx: &GradContext,
) -> Result<Vec<NodeId>> {
    Ok(vec![ctx.ograd; ctx.inputs.len()])
}
