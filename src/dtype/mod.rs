//! Data type system for pickr tensors
//!
//! This module provides the `DType` enum representing all supported element types
//! and the `Element` trait tying Rust scalar types to it.

mod element;

pub use element::Element;

use std::fmt;

// ============================================================================
// DType Enum
// ============================================================================

/// Data types supported by pickr tensors
///
/// This enum represents the element type of a tensor at runtime. Graph nodes
/// carry a `DType` through type inference; kernels are monomorphized over the
/// matching [`Element`] type with `dispatch_dtype!`.
///
/// # Discriminant Values (Serialization Stability)
///
/// - Floats: 0-9 (F64=0, F32=1, F16=2, BF16=3)
/// - Signed ints: 10-19 (I64=10, I32=11, I16=12, I8=13)
/// - Unsigned ints: 20-29 (U8=23)
/// - Bool: 30
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point (most common)
    F32 = 1,
    /// 16-bit floating point (IEEE 754), requires the `f16` feature for compute
    F16 = 2,
    /// 16-bit brain floating point, requires the `f16` feature for compute
    BF16 = 3,

    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 16-bit signed integer
    I16 = 12,
    /// 8-bit signed integer
    I8 = 13,

    /// 8-bit unsigned integer
    U8 = 23,

    /// Boolean type (stored as u8)
    Bool = 30,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 | Self::I64 => 8,
            Self::F32 | Self::I32 => 4,
            Self::F16 | Self::BF16 | Self::I16 => 2,
            Self::I8 | Self::U8 | Self::Bool => 1,
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32 | Self::F16 | Self::BF16)
    }

    /// Returns true if this is any integer type (signed or unsigned)
    #[inline]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::I64 | Self::I32 | Self::I16 | Self::I8 | Self::U8)
    }

    /// Returns true for types that carry ordinary numeric values
    ///
    /// Selection operators accept any numeric dtype for data and index tensors.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.is_float() || self.is_int()
    }

    /// Largest position along an axis this dtype stores exactly
    ///
    /// Every integer in `[0, max_exact_index]` round-trips through the type:
    /// the integer range for integer types, `2^(mantissa bits + 1)` for floats.
    #[inline]
    pub const fn max_exact_index(self) -> u64 {
        match self {
            Self::F64 => 1 << 53,
            Self::F32 => 1 << 24,
            Self::F16 => 1 << 11,
            Self::BF16 => 1 << 8,
            Self::I64 => i64::MAX as u64,
            Self::I32 => i32::MAX as u64,
            Self::I16 => i16::MAX as u64,
            Self::I8 => i8::MAX as u64,
            Self::U8 => u8::MAX as u64,
            Self::Bool => 1,
        }
    }

    /// Short name for display (e.g., "f32", "i64")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::F16 => "f16",
            Self::BF16 => "bf16",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::I16 => "i16",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
