//! Node construction facility handed to gradient rules

use crate::error::Result;
use crate::graph::{Graph, GraphInfo, NodeId, OpRegistry};
use crate::ops::OpAttrs;
use crate::runtime::Runtime;

/// Appends backward nodes to a graph during gradient composition
///
/// Also exposes the inferred shapes of the forward graph, which rules need
/// to size their outputs (e.g. the data shape of a backward scatter).
pub struct GradBuilder<'a, R: Runtime> {
    graph: &'a mut Graph,
    registry: &'a OpRegistry<R>,
    forward: &'a GraphInfo,
}

impl<'a, R: Runtime> GradBuilder<'a, R> {
    pub(crate) fn new(
        graph: &'a mut Graph,
        registry: &'a OpRegistry<R>,
        forward: &'a GraphInfo,
    ) -> Self {
        Self {
            graph,
            registry,
            forward,
        }
    }

    /// The graph being extended
    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// Inferred shape of a forward node
    pub fn shape(&self, id: NodeId) -> Result<&[usize]> {
        self.forward.shape(id)
    }

    /// Append an operator node
    pub fn op(&mut self, name: &str, inputs: &[NodeId], attrs: OpAttrs) -> Result<NodeId> {
        self.graph.op(self.registry, name, inputs, attrs)
    }

    /// Zero tensor shaped like `x`
    pub fn zeros_like(&mut self, x: NodeId) -> Result<NodeId> {
        self.op("zeros_like", &[x], OpAttrs::None)
    }

    /// Tensor of ones shaped like `x`
    pub fn ones_like(&mut self, x: NodeId) -> Result<NodeId> {
        self.op("ones_like", &[x], OpAttrs::None)
    }

    /// Sum of gradient contributions, chained pairwise with `_grad_add`
    pub fn sum(&mut self, grads: &[NodeId]) -> Result<Option<NodeId>> {
        let Some((&first, rest)) = grads.split_first() else {
            return Ok(None);
        };
        let mut total = first;
        for &g in rest {
            total = self.op("_grad_add", &[total, g], OpAttrs::None)?;
        }
        Ok(Some(total))
    }
}
