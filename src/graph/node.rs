//! Graph nodes

use crate::dtype::DType;
use crate::ops::OpAttrs;
use std::fmt;

/// Identifier of a node: its position in the graph arena
///
/// Ids are handed out in construction order, and a node can only consume
/// nodes that already exist, so increasing id order is a topological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the graph arena
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// What a node computes
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Graph input bound to a tensor at execution time
    Variable {
        /// Name used to look the tensor up in the feeds
        name: String,
        /// Declared shape
        shape: Vec<usize>,
        /// Declared element type
        dtype: DType,
    },
    /// Operator application
    Op {
        /// Canonical operator name
        op: &'static str,
        /// Resolved, immutable parameters
        attrs: OpAttrs,
        /// Input nodes, in the operator's input order
        inputs: Vec<NodeId>,
    },
}

/// A node of a [`Graph`](super::Graph)
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) kind: NodeKind,
}

impl Node {
    /// What this node computes
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Input nodes (empty for variables)
    pub fn inputs(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Variable { .. } => &[],
            NodeKind::Op { inputs, .. } => inputs,
        }
    }

    /// Operator name, or `None` for variables
    pub fn op(&self) -> Option<&'static str> {
        match &self.kind {
            NodeKind::Variable { .. } => None,
            NodeKind::Op { op, .. } => Some(op),
        }
    }

    /// Operator attributes (`OpAttrs::None` for variables)
    pub fn attrs(&self) -> &OpAttrs {
        const NONE: &OpAttrs = &OpAttrs::None;
        match &self.kind {
            NodeKind::Variable { .. } => NONE,
            NodeKind::Op { attrs, .. } => attrs,
        }
    }

    /// Whether this node is a graph input
    pub fn is_variable(&self) -> bool {
        matches!(self.kind, NodeKind::Variable { .. })
    }
}
