//! CPU runtime implementation
//!
//! The CPU runtime uses 64-byte aligned, zero-initialised heap allocations and
//! is the reference backend for every selection operator. Kernels split work
//! over the outer extent of the `(outer, axis, inner)` decomposition and run
//! it on rayon when the "rayon" feature is enabled.

mod client;
mod device;
pub(crate) mod helpers;
pub(crate) mod kernels;
mod runtime;

pub use crate::tensor::Tensor;
pub use client::{CpuClient, DEFAULT_RAYON_MIN_LEN, ParallelismConfig};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
