//! Reverse-mode gradient composition
//!
//! Walks the forward graph in reverse arena order (a valid reverse
//! topological order, since nodes only consume earlier nodes) and appends
//! the backward nodes produced by each operator's gradient rule.

use super::{GradBuilder, GradContext};
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, NodeKind, OpRegistry};
use crate::runtime::Runtime;

/// Append gradient nodes of `ys` with respect to `xs`
///
/// Every head in `ys` is seeded with `ones_like(y)`, so the result is the
/// gradient of the sum of all heads. Returns one node per entry of `xs`, in
/// order; an `x` that no head depends on gets `zeros_like(x)`.
///
/// Only nodes lying on a path from some `x` to some `y` are differentiated.
/// Contributions reaching a node from several consumers are summed with
/// `_grad_add` before its rule runs.
///
/// # Errors
///
/// - `UnknownNode` if an id does not belong to `graph`
/// - any inference error of the forward graph
/// - `NotDifferentiable` if a node on the path has no gradient rule
///
/// On error the graph may hold some already-appended backward nodes; they
/// are unreachable from the returned ids and harmless to execute.
///
/// # Example
///
/// ```ignore
/// let y = graph.op(&registry, "pick", &[x, i], OpAttrs::Pick(PickParam::axis(-1)))?;
/// let grads = gradient(&mut graph, &registry, &[y], &[x])?;
/// let dx = executor.run(&graph, &feeds)?.get(grads[0])?;
/// ```
pub fn gradient<R: Runtime>(
    graph: &mut Graph,
    registry: &OpRegistry<R>,
    ys: &[NodeId],
    xs: &[NodeId],
) -> Result<Vec<NodeId>> {
    for &id in ys.iter().chain(xs) {
        graph.node(id)?;
    }

    let forward = graph.infer(registry)?;
    let num_forward = graph.len();
    let on_path = path_mask(graph, ys, xs);
    log::debug!(
        "gradient: {} heads, {} inputs, {} of {} nodes on path",
        ys.len(),
        xs.len(),
        on_path.iter().filter(|&&p| p).count(),
        num_forward
    );

    let mut builder = GradBuilder::new(graph, registry, &forward);
    let mut pending: Vec<Vec<NodeId>> = vec![Vec::new(); num_forward];
    let mut totals: Vec<Option<NodeId>> = vec![None; num_forward];

    for &y in ys {
        if on_path[y.0] {
            let seed = builder.ones_like(y)?;
            pending[y.0].push(seed);
        }
    }

    for index in (0..num_forward).rev() {
        let Some(ograd) = builder.sum(&pending[index])? else {
            continue;
        };
        totals[index] = Some(ograd);

        let node = NodeId(index);
        let NodeKind::Op { op, attrs, inputs } = builder.graph().node(node)?.kind().clone() else {
            continue;
        };
        if !inputs.iter().any(|i| on_path[i.0]) {
            continue;
        }

        let def = registry.get(op)?;
        let rule = def
            .gradient
            .ok_or(Error::NotDifferentiable { op: def.name })?;
        let ctx = GradContext {
            node,
            op: def.name,
            inputs,
            attrs,
            ograd,
        };
        let grads = rule(&mut builder, &ctx)?;
        if grads.len() != ctx.inputs.len() {
            return Err(Error::Internal(format!(
                "gradient rule of '{}' returned {} gradients for {} inputs",
                def.name,
                grads.len(),
                ctx.inputs.len()
            )));
        }
        log::trace!("gradient: {node} ({op}) -> {grads:?}");

        for (&input, grad) in ctx.inputs.iter().zip(grads) {
            if on_path[input.0] {
                pending[input.0].push(grad);
            }
        }
    }

    xs.iter()
        .map(|&x| match totals[x.0] {
            Some(total) => Ok(total),
            None => builder.zeros_like(x),
        })
        .collect()
}

/// Nodes reachable forward from some `x` and backward from some `y`
fn path_mask(graph: &Graph, ys: &[NodeId], xs: &[NodeId]) -> Vec<bool> {
    let len = graph.len();

    let mut from_x = vec![false; len];
    for &x in xs {
        from_x[x.0] = true;
    }
    for (id, node) in graph.nodes() {
        if node.inputs().iter().any(|i| from_x[i.0]) {
            from_x[id.0] = true;
        }
    }

    let mut to_y = vec![false; len];
    for &y in ys {
        to_y[y.0] = true;
    }
    let nodes: Vec<_> = graph.nodes().collect();
    for (id, node) in nodes.into_iter().rev() {
        if to_y[id.0] {
            for input in node.inputs() {
                to_y[input.0] = true;
            }
        }
    }

    from_x.iter().zip(&to_y).map(|(&a, &b)| a && b).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::ops::{OpAttrs, PickParam, ReduceAxisParam};
    use crate::runtime::cpu::CpuRuntime;

    fn pick_graph() -> (OpRegistry<CpuRuntime>, Graph, NodeId, NodeId, NodeId) {
        let registry = OpRegistry::<CpuRuntime>::builtin();
        let mut graph = Graph::new();
        let x = graph.variable("x", &[3, 2], DType::F32);
        let i = graph.variable("i", &[3], DType::F32);
        let y = graph
            .op(&registry, "pick", &[x, i], OpAttrs::Pick(PickParam::axis(-1)))
            .unwrap();
        (registry, graph, x, i, y)
    }

    #[test]
    fn test_pick_gradient_structure() {
        let (registry, mut graph, x, _, y) = pick_graph();
        let grads = gradient(&mut graph, &registry, &[y], &[x]).unwrap();

        let dx = graph.node(grads[0]).unwrap();
        assert_eq!(dx.op(), Some("_backward_pick"));
        let (param, data_shape) = dx.attrs().backward_pick().unwrap();
        assert_eq!(param, &PickParam::axis(-1));
        assert_eq!(data_shape, &[3, 2]);

        let info = graph.infer(&registry).unwrap();
        assert_eq!(info.shape(grads[0]).unwrap(), &[3, 2]);
        assert_eq!(info.dtype(grads[0]).unwrap(), DType::F32);
    }

    #[test]
    fn test_unreached_input_gets_zeros() {
        let (registry, mut graph, x, _, y) = pick_graph();
        let z = graph.variable("z", &[4], DType::F64);
        let grads = gradient(&mut graph, &registry, &[y], &[z, x]).unwrap();

        assert_eq!(graph.node(grads[0]).unwrap().op(), Some("zeros_like"));
        assert_eq!(graph.node(grads[0]).unwrap().inputs(), &[z]);
        assert_eq!(graph.node(grads[1]).unwrap().op(), Some("_backward_pick"));
    }

    #[test]
    fn test_multiple_consumers_are_summed() {
        let (registry, mut graph, x, i, y1) = pick_graph();
        let y2 = graph
            .op(&registry, "pick", &[x, i], OpAttrs::Pick(PickParam::axis(-1)))
            .unwrap();
        let grads = gradient(&mut graph, &registry, &[y1, y2], &[x]).unwrap();

        let dx = graph.node(grads[0]).unwrap();
        assert_eq!(dx.op(), Some("_grad_add"));
        for &part in dx.inputs() {
            assert_eq!(graph.node(part).unwrap().op(), Some("_backward_pick"));
        }
    }

    #[test]
    fn test_argmax_has_zero_gradient() {
        let registry = OpRegistry::<CpuRuntime>::builtin();
        let mut graph = Graph::new();
        let x = graph.variable("x", &[2, 3], DType::F32);
        let y = graph
            .op(&registry, "argmax", &[x], OpAttrs::Reduce(ReduceAxisParam::axis(1)))
            .unwrap();
        let grads = gradient(&mut graph, &registry, &[y], &[x]).unwrap();

        let dx = graph.node(grads[0]).unwrap();
        assert_eq!(dx.op(), Some("zeros_like"));
        assert_eq!(dx.inputs(), &[x]);
    }

    #[test]
    fn test_second_order_through_backward_pick_fails() {
        let (registry, mut graph, x, _, y) = pick_graph();
        let first = gradient(&mut graph, &registry, &[y], &[x]).unwrap();
        assert_eq!(
            gradient(&mut graph, &registry, &[first[0]], &[x]),
            Err(Error::NotDifferentiable {
                op: "_backward_pick"
            })
        );
    }

    #[test]
    fn test_unknown_node() {
        let (registry, mut graph, x, _, _) = pick_graph();
        assert_eq!(
            gradient(&mut graph, &registry, &[NodeId(99)], &[x]),
            Err(Error::UnknownNode(99))
        );
    }
}
