//! CPU implementation of the selection operations.
//!
//! Each trait impl validates its buffers with the shared inference rules and
//! hands the `(outer, axis, inner)` geometry to the CPU helpers.

mod pick;
mod search;
mod utility;
