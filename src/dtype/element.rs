//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::ops::Add;

/// Trait for types that can be elements of a tensor
///
/// This trait connects Rust's type system to pickr's runtime dtype system.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Kernels move elements across rayon tasks
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
/// - `Add` - Gradient accumulation (`OpReq::AddTo`, backward scatter)
/// - `PartialOrd` - Extremum search
pub trait Element:
    Copy + Send + Sync + Pod + Zeroable + 'static + Add<Output = Self> + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type (saturating for integers)
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Interpret this value as a position along an axis
    ///
    /// Floating point values truncate toward zero; NaN maps to 0.
    #[inline]
    fn to_index(self) -> i64 {
        self.to_f64() as i64
    }

    /// Store a position along an axis as an element value
    ///
    /// `i` must not exceed [`DType::max_exact_index`] of `Self::DTYPE`;
    /// inference rejects reductions whose positions would not fit.
    #[inline]
    fn from_index(i: usize) -> Self {
        Self::from_f64(i as f64)
    }
}

macro_rules! impl_primitive_element {
    ($($t:ty => $dtype:ident, $zero:expr, $one:expr;)*) => {
        $(
            impl Element for $t {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                #[inline]
                fn zero() -> Self {
                    $zero
                }

                #[inline]
                fn one() -> Self {
                    $one
                }
            }
        )*
    };
}

impl_primitive_element! {
    f64 => F64, 0.0, 1.0;
    f32 => F32, 0.0, 1.0;
    i64 => I64, 0, 1;
    i32 => I32, 0, 1;
    i16 => I16, 0, 1;
    i8 => I8, 0, 1;
    u8 => U8, 0, 1;
}

// ============================================================================
// Half-precision floating point types (requires "f16" feature)
// ============================================================================

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn to_f64(self) -> f64 {
        half::f16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        half::f16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::f16::ONE
    }
}

#[cfg(feature = "f16")]
impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn to_f64(self) -> f64 {
        half::bf16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::bf16::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        half::bf16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::bf16::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i32::DTYPE, DType::I32);
        assert_eq!(u8::DTYPE, DType::U8);
    }

    #[test]
    fn test_index_truncation() {
        assert_eq!(1.9f32.to_index(), 1);
        assert_eq!((-0.5f64).to_index(), 0);
        assert_eq!((-1.5f64).to_index(), -1);
        assert_eq!(f32::NAN.to_index(), 0);
        assert_eq!(7i16.to_index(), 7);
        assert_eq!(f32::from_index(3), 3.0);
        assert_eq!(u8::from_index(255), 255);
        assert_eq!(i8::from_index(127), 127);
    }

    #[cfg(feature = "f16")]
    #[test]
    fn test_half_elements() {
        assert_eq!(half::f16::DTYPE, DType::F16);
        assert_eq!(half::bf16::from_index(2).to_f64(), 2.0);
        assert_eq!(half::f16::from_f64(2.75).to_index(), 2);
    }
}
