//! Raw CPU kernels for the selection operators
//!
//! Kernels work on raw pointers into contiguous row-major buffers viewed as
//! `[outer, axis_len, inner]` blocks. Each `*_row` function handles one outer
//! index and touches a disjoint region of its output, so callers may run
//! rows in parallel without synchronization.

#![allow(unsafe_op_in_unsafe_fn)]

mod binary;
mod memory;
mod pick;
mod search;

pub use binary::add_kernel;
pub use memory::{fill_kernel, fill_row};
pub use pick::{
    find_out_of_range, pick_backward_kernel, pick_backward_row, pick_forward_kernel,
    pick_forward_row,
};
pub use search::{search_axis_kernel, search_axis_row};

use crate::dtype::Element;
use crate::ops::OpReq;

/// Store `value` at `out` according to `req`
///
/// # Safety
/// - `out` must be valid for reads and writes
#[inline(always)]
pub(crate) unsafe fn store<T: Element>(out: *mut T, value: T, req: OpReq) {
    match req {
        OpReq::Null => {}
        OpReq::WriteTo => *out = value,
        OpReq::AddTo => *out = *out + value,
    }
}
