//! Built-in operator definitions
//!
//! Adapters between the generic registry hooks and the typed inference
//! functions and op traits in [`crate::ops`]. Arity is checked by
//! [`OpDef`] before any hook runs, so the adapters index inputs directly.

use super::registry::OpDef;
use crate::autograd::rules;
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{
    AttrKind, OpAttrs, OpReq, PickOps, ReduceAxisParam, SearchOps, SelectionOps, UtilityOps,
    backward_pick_shape, channel_shape, pick_shape, pick_type, reduce_axis_shape, same_shape,
    same_type, search_type,
};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

pub(crate) fn definitions<R: Runtime>() -> Vec<OpDef<R>>
where
    R::Client: SelectionOps<R>,
{
    vec![
        OpDef {
            name: "argmax",
            aliases: &[],
            input_names: &["data"],
            attr_kind: AttrKind::Reduce,
            is_backward: false,
            infer_shape: reduce_shape,
            infer_type: argmax_type,
            compute: argmax_compute::<R>,
            gradient: Some(rules::zero_gradient::<R>),
        },
        OpDef {
            name: "argmin",
            aliases: &[],
            input_names: &["data"],
            attr_kind: AttrKind::Reduce,
            is_backward: false,
            infer_shape: reduce_shape,
            infer_type: argmin_type,
            compute: argmin_compute::<R>,
            gradient: Some(rules::zero_gradient::<R>),
        },
        OpDef {
            name: "argmax_channel",
            aliases: &[],
            input_names: &["data"],
            attr_kind: AttrKind::None,
            is_backward: false,
            infer_shape: channel_shape_hook,
            infer_type: channel_type,
            compute: argmax_channel_compute::<R>,
            gradient: Some(rules::zero_gradient::<R>),
        },
        OpDef {
            name: "pick",
            aliases: &["batch_take"],
            input_names: &["data", "index"],
            attr_kind: AttrKind::Pick,
            is_backward: false,
            infer_shape: pick_shape_hook,
            infer_type: pick_type_hook,
            compute: pick_compute::<R>,
            gradient: Some(rules::pick_gradient::<R>),
        },
        OpDef {
            name: "_backward_pick",
            aliases: &[],
            input_names: &["ograd", "index"],
            attr_kind: AttrKind::BackwardPick,
            is_backward: true,
            infer_shape: backward_pick_shape_hook,
            infer_type: backward_pick_type,
            compute: backward_pick_compute::<R>,
            gradient: None,
        },
        OpDef {
            name: "zeros_like",
            aliases: &[],
            input_names: &["data"],
            attr_kind: AttrKind::None,
            is_backward: false,
            infer_shape: like_shape,
            infer_type: like_type,
            compute: zeros_like_compute::<R>,
            gradient: Some(rules::zero_gradient::<R>),
        },
        OpDef {
            name: "ones_like",
            aliases: &[],
            input_names: &["data"],
            attr_kind: AttrKind::None,
            is_backward: false,
            infer_shape: like_shape,
            infer_type: like_type,
            compute: ones_like_compute::<R>,
            gradient: Some(rules::zero_gradient::<R>),
        },
        OpDef {
            name: "_grad_add",
            aliases: &[],
            input_names: &["lhs", "rhs"],
            attr_kind: AttrKind::None,
            is_backward: false,
            infer_shape: add_shape,
            infer_type: add_type,
            compute: add_compute::<R>,
            gradient: Some(rules::pass_through_gradient::<R>),
        },
    ]
}

// ============================================================================
// Shape inference
// ============================================================================

fn reduce_shape(inputs: &[&[usize]], attrs: &OpAttrs) -> Result<Vec<usize>> {
    reduce_axis_shape(inputs[0], attrs.reduce()?)
}

fn channel_shape_hook(inputs: &[&[usize]], _attrs: &OpAttrs) -> Result<Vec<usize>> {
    channel_shape(inputs[0])
}

fn pick_shape_hook(inputs: &[&[usize]], attrs: &OpAttrs) -> Result<Vec<usize>> {
    pick_shape(inputs[0], inputs[1], attrs.pick()?)
}

fn backward_pick_shape_hook(inputs: &[&[usize]], attrs: &OpAttrs) -> Result<Vec<usize>> {
    let (param, data_shape) = attrs.backward_pick()?;
    backward_pick_shape(inputs[0], inputs[1], param, data_shape)
}

fn like_shape(inputs: &[&[usize]], _attrs: &OpAttrs) -> Result<Vec<usize>> {
    Ok(inputs[0].to_vec())
}

fn add_shape(inputs: &[&[usize]], _attrs: &OpAttrs) -> Result<Vec<usize>> {
    same_shape(inputs[0], inputs[1])
}

// ============================================================================
// Type inference
// ============================================================================

fn argmax_type(inputs: &[DType], shapes: &[&[usize]], attrs: &OpAttrs) -> Result<DType> {
    search_type(inputs[0], shapes[0], attrs.reduce()?, "argmax")
}

fn argmin_type(inputs: &[DType], shapes: &[&[usize]], attrs: &OpAttrs) -> Result<DType> {
    search_type(inputs[0], shapes[0], attrs.reduce()?, "argmin")
}

fn channel_type(inputs: &[DType], shapes: &[&[usize]], _attrs: &OpAttrs) -> Result<DType> {
    search_type(inputs[0], shapes[0], &ReduceAxisParam::channel(), "argmax_channel")
}

fn pick_type_hook(inputs: &[DType], _shapes: &[&[usize]], _attrs: &OpAttrs) -> Result<DType> {
    pick_type(inputs[0], inputs[1], "pick")
}

fn backward_pick_type(inputs: &[DType], _shapes: &[&[usize]], _attrs: &OpAttrs) -> Result<DType> {
    pick_type(inputs[0], inputs[1], "_backward_pick")
}

fn like_type(inputs: &[DType], _shapes: &[&[usize]], _attrs: &OpAttrs) -> Result<DType> {
    Ok(inputs[0])
}

fn add_type(inputs: &[DType], _shapes: &[&[usize]], _attrs: &OpAttrs) -> Result<DType> {
    same_type(inputs[0], inputs[1])
}

// ============================================================================
// Compute
// ============================================================================

fn argmax_compute<R: Runtime>(
    client: &R::Client,
    inputs: &[&Tensor<R>],
    attrs: &OpAttrs,
    out: &Tensor<R>,
    req: OpReq,
) -> Result<()>
where
    R::Client: SelectionOps<R>,
{
    client.argmax_into(inputs[0], attrs.reduce()?, out, req)
}

fn argmin_compute<R: Runtime>(
    client: &R::Client,
    inputs: &[&Tensor<R>],
    attrs: &OpAttrs,
    out: &Tensor<R>,
    req: OpReq,
) -> Result<()>
where
    R::Client: SelectionOps<R>,
{
    client.argmin_into(inputs[0], attrs.reduce()?, out, req)
}

fn argmax_channel_compute<R: Runtime>(
    client: &R::Client,
    inputs: &[&Tensor<R>],
    _attrs: &OpAttrs,
    out: &Tensor<R>,
    req: OpReq,
) -> Result<()>
where
    R::Client: SelectionOps<R>,
{
    client.argmax_channel_into(inputs[0], out, req)
}

fn pick_compute<R: Runtime>(
    client: &R::Client,
    inputs: &[&Tensor<R>],
    attrs: &OpAttrs,
    out: &Tensor<R>,
    req: OpReq,
) -> Result<()>
where
    R::Client: SelectionOps<R>,
{
    client.pick_into(inputs[0], inputs[1], attrs.pick()?, out, req)
}

fn backward_pick_compute<R: Runtime>(
    client: &R::Client,
    inputs: &[&Tensor<R>],
    attrs: &OpAttrs,
    out: &Tensor<R>,
    req: OpReq,
) -> Result<()>
where
    R::Client: SelectionOps<R>,
{
    let (param, _) = attrs.backward_pick()?;
    client.pick_backward_into(inputs[0], inputs[1], param, out, req)
}

fn zeros_like_compute<R: Runtime>(
    client: &R::Client,
    _inputs: &[&Tensor<R>],
    _attrs: &OpAttrs,
    out: &Tensor<R>,
    req: OpReq,
) -> Result<()>
where
    R::Client: SelectionOps<R>,
{
    client.fill_into(out, 0.0, req)
}

fn ones_like_compute<R: Runtime>(
    client: &R::Client,
    _inputs: &[&Tensor<R>],
    _attrs: &OpAttrs,
    out: &Tensor<R>,
    req: OpReq,
) -> Result<()>
where
    R::Client: SelectionOps<R>,
{
    client.fill_into(out, 1.0, req)
}

fn add_compute<R: Runtime>(
    client: &R::Client,
    inputs: &[&Tensor<R>],
    _attrs: &OpAttrs,
    out: &Tensor<R>,
    req: OpReq,
) -> Result<()>
where
    R::Client: SelectionOps<R>,
{
    client.add_into(inputs[0], inputs[1], out, req)
}
