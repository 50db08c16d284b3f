//! # pickr
//!
//! **Index-selection operators for symbolic tensor graphs.**
//!
//! pickr provides the arg-reduction and gather family of operators together
//! with the graph plumbing they plug into: static shape/type inference, a
//! CPU execution engine and lazy reverse-mode gradient composition.
//!
//! ## Operators
//!
//! - **`argmax` / `argmin`**: position of the first extremum along an axis,
//!   or over the flattened tensor
//! - **`argmax_channel`**: legacy `argmax` fixed to axis 1
//! - **`pick`** (alias `batch_take`): gather one element per position along
//!   an axis, with clip, wrap or raise handling of out-of-range indices
//! - **`_backward_pick`**: the scatter-add gradient of `pick`
//! - **`zeros_like` / `ones_like` / `_grad_add`**: gradient plumbing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pickr::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let x = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2], &device);
//! let i = Tensor::<CpuRuntime>::from_slice(&[0.0f32, 1.0, 0.0], &[3], &device);
//!
//! let picked = client.pick(&x, &i, &PickParam::axis(-1))?;
//! assert_eq!(picked.to_vec::<f32>(), [1.0, 4.0, 5.0]);
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): CPU backend
//! - `rayon` (default): Multi-threaded CPU kernels
//! - `f16`: Half-precision floats (F16, BF16)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod autograd;
pub mod dtype;
pub mod error;
pub mod graph;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::autograd::{GradBuilder, GradContext, gradient};
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::graph::{Executor, Graph, GraphInfo, NodeId, OpRegistry};
    pub use crate::ops::{
        OpAttrs, OpReq, PickMode, PickOps, PickParam, ReduceAxisParam, SearchOps, SelectionOps,
        UtilityOps,
    };
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::tensor::{Layout, Tensor};

    #[cfg(feature = "cpu")]
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime, ParallelismConfig};
}

/// Default runtime
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
