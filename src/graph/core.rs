//! Symbolic graph: an append-only arena of nodes

use super::node::{Node, NodeId, NodeKind};
use super::registry::OpRegistry;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::OpAttrs;
use crate::runtime::Runtime;

/// A computational graph of variables and operator applications
///
/// Nodes are only ever appended, and an operator node may only consume
/// nodes that already exist, so the arena order is a valid execution order.
/// Gradient composition appends its backward nodes to the same arena.
///
/// # Example
///
/// ```ignore
/// let registry = OpRegistry::<CpuRuntime>::builtin();
/// let mut graph = Graph::new();
/// let x = graph.variable("x", &[3, 2], DType::F32);
/// let i = graph.variable("i", &[3], DType::I32);
/// let y = graph.op(&registry, "pick", &[x, i], OpAttrs::Pick(PickParam::axis(-1)))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node, failing with `UnknownNode` for foreign ids
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(Error::UnknownNode(id.0))
    }

    /// Iterate over `(id, node)` pairs in arena order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Id of the variable called `name`, if any
    pub fn variable_id(&self, name: &str) -> Option<NodeId> {
        self.nodes().find_map(|(id, node)| match node.kind() {
            NodeKind::Variable { name: n, .. } if n == name => Some(id),
            _ => None,
        })
    }

    /// Append a graph input
    pub fn variable(&mut self, name: impl Into<String>, shape: &[usize], dtype: DType) -> NodeId {
        let name = name.into();
        let id = NodeId(self.nodes.len());
        log::trace!("graph: {id} = variable '{name}' {shape:?} {dtype}");
        self.nodes.push(Node {
            kind: NodeKind::Variable {
                name,
                shape: shape.to_vec(),
                dtype,
            },
        });
        id
    }

    /// Append an operator application
    ///
    /// `name` may be an alias; the node records the canonical name. Fails
    /// with `UnknownOperator`, `ArityMismatch`, `InvalidArgument` (attribute
    /// kind) or `UnknownNode` without modifying the graph. Shapes and dtypes
    /// are checked later by [`Graph::infer`].
    pub fn op<R: Runtime>(
        &mut self,
        registry: &OpRegistry<R>,
        name: &str,
        inputs: &[NodeId],
        attrs: OpAttrs,
    ) -> Result<NodeId> {
        let def = registry.get(name)?;
        def.check_arity(inputs.len())?;
        def.check_attrs(&attrs)?;
        for &input in inputs {
            self.node(input)?;
        }

        let id = NodeId(self.nodes.len());
        log::trace!("graph: {id} = {}({inputs:?})", def.name);
        self.nodes.push(Node {
            kind: NodeKind::Op {
                op: def.name,
                attrs,
                inputs: inputs.to_vec(),
            },
        });
        Ok(id)
    }

    /// Consumers of every node, indexed by node position
    pub fn consumers(&self) -> Vec<Vec<NodeId>> {
        let mut consumers = vec![Vec::new(); self.nodes.len()];
        for (id, node) in self.nodes() {
            for input in node.inputs() {
                consumers[input.0].push(id);
            }
        }
        consumers
    }
}
