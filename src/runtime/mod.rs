//! Runtime backends for tensor computation
//!
//! This module defines the `Runtime` trait and the CPU backend.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity, memory)
//! ├── Device (identifies a specific compute unit)
//! └── Client (dispatches operations, owns parallelism settings)
//! ```

pub mod cpu;
mod traits;

pub use traits::{Device, Runtime, RuntimeClient};
