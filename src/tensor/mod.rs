//! Tensor types
//!
//! This module provides the core `Tensor` type, an n-dimensional row-major
//! array stored on a compute device.

mod core;
mod layout;
mod storage;

pub use core::Tensor;
pub use layout::{Layout, Shape, split_at_axis};
pub use storage::Storage;
