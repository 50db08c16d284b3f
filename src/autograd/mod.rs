//! Gradient composition over symbolic graphs
//!
//! Gradients are built lazily: nothing is added to a [`Graph`] until
//! [`gradient`] is called, which appends backward nodes for exactly the
//! forward nodes lying between the requested inputs and outputs. The new
//! nodes are ordinary graph nodes, executed through the same compute entry
//! points as the forward pass.
//!
//! Each differentiable operator supplies a [`GradientFn`] in its registry
//! entry. A rule receives a [`GradContext`] describing the forward node and
//! its summed upstream gradient, and returns one gradient node per input,
//! built through a [`GradBuilder`].
//!
//! [`Graph`]: crate::graph::Graph

mod builder;
mod gradient;
pub(crate) mod rules;

pub use builder::GradBuilder;
pub use gradient::gradient;

use crate::error::Result;
use crate::graph::NodeId;
use crate::ops::OpAttrs;

/// A forward node as seen by its gradient rule
#[derive(Debug, Clone, PartialEq)]
pub struct GradContext {
    /// The forward node
    pub node: NodeId,
    /// Its canonical operator name
    pub op: &'static str,
    /// Its inputs, in operator input order
    pub inputs: Vec<NodeId>,
    /// Its attributes
    pub attrs: OpAttrs,
    /// Gradient of the objective with respect to the node's output
    pub ograd: NodeId,
}

/// Gradient rule: builds one gradient node per input of a forward node
pub type GradientFn<R> = fn(&mut GradBuilder<'_, R>, &GradContext) -> Result<Vec<NodeId>>;
