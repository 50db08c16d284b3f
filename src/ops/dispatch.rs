//! DType dispatch utilities
//!
//! This module provides the `dispatch_dtype!` macro for runtime type dispatch.
//! It converts a `DType` value into a concrete Rust type bound to an
//! identifier inside a code block, so kernels can be monomorphized.
//!
//! # Usage
//!
//! ```ignore
//! fn my_operation(dtype: DType) -> Result<()> {
//!     dispatch_dtype!(dtype, T => {
//!         // T is now a concrete type (f32, f64, i32, etc.)
//!         let size = std::mem::size_of::<T>();
//!         Ok(())
//!     }, "my_operation")
//! }
//! ```
//!
//! Nested dispatch (data dtype and index dtype) binds two identifiers:
//!
//! ```ignore
//! dispatch_dtype!(data_dtype, T => {
//!     dispatch_dtype!(index_dtype, I => {
//!         unsafe { kernel::<T, I>(...) }
//!     }, "pick")
//! }, "pick");
//! ```
//!
//! ## Supported Types
//!
//! - `F64` -> `f64`, `F32` -> `f32`
//! - `F16` -> `half::f16`, `BF16` -> `half::bf16` (require the "f16" feature)
//! - `I64` -> `i64`, `I32` -> `i32`, `I16` -> `i16`, `I8` -> `i8`
//! - `U8` -> `u8`
//! - `Bool` -> Returns `UnsupportedDType` error

/// Internal helper macro to dispatch types requiring the "f16" feature.
#[macro_export]
#[doc(hidden)]
macro_rules! dispatch_f16_type {
    ($T:ident, $body:block, $dtype:expr, $error_op:expr, $type:ty) => {{
        #[cfg(feature = "f16")]
        {
            type $T = $type;
            $body
        }
        #[cfg(not(feature = "f16"))]
        {
            return Err($crate::error::Error::UnsupportedDType {
                dtype: $dtype,
                op: $error_op,
            });
        }
    }};
}

/// Macro for runtime dtype dispatch to typed operations.
///
/// Executes `$body` with `$T` bound to the Rust type of `$dtype`. The
/// enclosing function must return `Result<_, Error>`: unsupported dtypes
/// return early with `UnsupportedDType`.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F16 => {
                $crate::dispatch_f16_type!($T, $body, $dtype, $error_op, half::f16)
            }
            $crate::dtype::DType::BF16 => {
                $crate::dispatch_f16_type!($T, $body, $dtype, $error_op, half::bf16)
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
            $crate::dtype::DType::Bool => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: $dtype,
                    op: $error_op,
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::dtype::DType;
    use crate::error::{Error, Result};

    fn elem_size(dtype: DType) -> Result<usize> {
        dispatch_dtype!(dtype, T => {
            Ok(std::mem::size_of::<T>())
        }, "elem_size")
    }

    #[test]
    fn test_dispatch_binds_matching_type() {
        assert_eq!(elem_size(DType::F64).unwrap(), 8);
        assert_eq!(elem_size(DType::I16).unwrap(), 2);
        assert_eq!(elem_size(DType::U8).unwrap(), 1);
    }

    #[test]
    fn test_dispatch_rejects_bool() {
        assert_eq!(
            elem_size(DType::Bool),
            Err(Error::UnsupportedDType {
                dtype: DType::Bool,
                op: "elem_size",
            })
        );
    }
}
