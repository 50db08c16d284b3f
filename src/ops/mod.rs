//! Selection operations
//!
//! This module holds everything the graph layer needs to drive the
//! selection operators on a backend:
//!
//! - parameter objects ([`ReduceAxisParam`], [`PickParam`], [`OpReq`], ...)
//! - pure shape and type inference ([`reduce_axis_shape`], [`pick_shape`], ...)
//! - backend-facing op traits ([`SearchOps`], [`PickOps`], [`UtilityOps`])
//!   implemented by runtime clients
//!
//! ```text
//! RuntimeClient<R>
//!   └── implements SelectionOps<R>
//!         ├── SearchOps   argmax, argmin, argmax_channel
//!         ├── PickOps     pick, pick_backward
//!         └── UtilityOps  fill (zeros_like / ones_like), add
//! ```

mod cpu;
mod dispatch;
mod params;
mod shape;
pub(crate) mod traits;

pub use params::*;
pub use shape::*;
pub use traits::{PickOps, SearchOps, SelectionOps, UtilityOps};
