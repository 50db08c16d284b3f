//! Operation traits for the selection operators.
//!
//! Each trait is implemented by a runtime client. The `*_into` methods are the
//! compute entry points the graph executor calls: they validate the buffers
//! against shape/type inference and write into the given output according to
//! an [`OpReq`](crate::ops::OpReq). The allocating methods are conveniences
//! built on top of them.

mod pick;
mod search;
mod utility;

pub use pick::PickOps;
pub use search::SearchOps;
pub use utility::UtilityOps;

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// A client implementing every selection op trait
///
/// This is what the operator registry and executor require of `R::Client`.
pub trait SelectionOps<R: Runtime>: SearchOps<R> + PickOps<R> + UtilityOps<R> {}

impl<R: Runtime, C> SelectionOps<R> for C where C: SearchOps<R> + PickOps<R> + UtilityOps<R> {}

/// Check that a caller-provided output buffer has the inferred shape and dtype
pub(crate) fn check_output<R: Runtime>(out: &Tensor<R>, shape: &[usize], dtype: DType) -> Result<()> {
    if out.shape() != shape {
        return Err(Error::shape_mismatch(shape, out.shape()));
    }
    if out.dtype() != dtype {
        return Err(Error::DTypeMismatch {
            lhs: dtype,
            rhs: out.dtype(),
        });
    }
    Ok(())
}
