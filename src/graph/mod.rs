//! Symbolic computation graphs
//!
//! The host-engine surface the selection core plugs into:
//!
//! - [`Graph`]: append-only arena of variables and operator nodes; its
//!   node-construction methods are also what gradient rules use
//! - [`OpRegistry`]: name to [`OpDef`] table of inference, compute and
//!   gradient hooks, built once and shared read-only
//! - [`Graph::infer`]: static shape/type validation producing [`GraphInfo`]
//! - [`Executor`]: binds feeds and runs compute hooks in arena order

mod builtin;
mod core;
mod executor;
mod infer;
mod node;
mod registry;

pub use core::Graph;
pub use executor::{Executor, Values};
pub use infer::GraphInfo;
pub use node::{Node, NodeId, NodeKind};
pub use registry::{ComputeFn, InferShapeFn, InferTypeFn, OpDef, OpRegistry};
