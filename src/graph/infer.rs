//! Static shape and type inference over a whole graph

use super::core::Graph;
use super::node::{NodeId, NodeKind};
use super::registry::OpRegistry;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Inferred shape and dtype of every node of a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphInfo {
    shapes: Vec<Vec<usize>>,
    dtypes: Vec<DType>,
}

impl GraphInfo {
    /// Inferred shape of a node
    pub fn shape(&self, id: NodeId) -> Result<&[usize]> {
        self.shapes
            .get(id.0)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownNode(id.0))
    }

    /// Inferred dtype of a node
    pub fn dtype(&self, id: NodeId) -> Result<DType> {
        self.dtypes.get(id.0).copied().ok_or(Error::UnknownNode(id.0))
    }

    /// Number of nodes covered
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether no node is covered
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Graph {
    /// Run shape then type inference for every node in arena order
    ///
    /// Returns the first failure: axis, shape and dtype errors are reported
    /// here, before any tensor is touched.
    pub fn infer<R: Runtime>(&self, registry: &OpRegistry<R>) -> Result<GraphInfo> {
        let mut shapes: Vec<Vec<usize>> = Vec::with_capacity(self.len());
        let mut dtypes: Vec<DType> = Vec::with_capacity(self.len());

        for (id, node) in self.nodes() {
            let (shape, dtype) = match node.kind() {
                NodeKind::Variable { shape, dtype, .. } => (shape.clone(), *dtype),
                NodeKind::Op { op, attrs, inputs } => {
                    let def = registry.get(op)?;
                    let in_shapes: Vec<&[usize]> =
                        inputs.iter().map(|i| shapes[i.0].as_slice()).collect();
                    let in_dtypes: Vec<DType> = inputs.iter().map(|i| dtypes[i.0]).collect();

                    let inferred = def
                        .output_shape(&in_shapes, attrs)
                        .and_then(|shape| Ok((shape, def.output_type(&in_dtypes, &in_shapes, attrs)?)));
                    match inferred {
                        Ok(inferred) => inferred,
                        Err(e) => {
                            log::debug!("inference failed at {id} ({op}): {e}");
                            return Err(e);
                        }
                    }
                }
            };

            log::trace!("infer: {id} -> {shape:?} {dtype}");
            shapes.push(shape);
            dtypes.push(dtype);
        }

        Ok(GraphInfo { shapes, dtypes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{OpAttrs, ReduceAxisParam};
    use crate::runtime::cpu::CpuRuntime;

    #[test]
    fn test_infer_chain() {
        let registry = OpRegistry::<CpuRuntime>::builtin();
        let mut graph = Graph::new();
        let x = graph.variable("x", &[2, 3, 4], DType::F64);
        let a = graph
            .op(
                &registry,
                "argmax",
                &[x],
                OpAttrs::Reduce(ReduceAxisParam::axis(-1).keepdims(true)),
            )
            .unwrap();
        let c = graph
            .op(&registry, "argmax_channel", &[x], OpAttrs::None)
            .unwrap();

        let info = graph.infer(&registry).unwrap();
        assert_eq!(info.len(), 3);
        assert_eq!(info.shape(a).unwrap(), &[2, 3, 1]);
        assert_eq!(info.dtype(a).unwrap(), DType::F64);
        assert_eq!(info.shape(c).unwrap(), &[2, 4]);
        assert!(info.shape(NodeId(9)).is_err());
    }

    #[test]
    fn test_infer_reports_axis_error() {
        let registry = OpRegistry::<CpuRuntime>::builtin();
        let mut graph = Graph::new();
        let x = graph.variable("x", &[2, 3], DType::F32);
        graph
            .op(
                &registry,
                "argmin",
                &[x],
                OpAttrs::Reduce(ReduceAxisParam::axis(5)),
            )
            .unwrap();

        assert_eq!(
            graph.infer(&registry),
            Err(Error::InvalidDimension { dim: 5, ndim: 2 })
        );
    }
}
