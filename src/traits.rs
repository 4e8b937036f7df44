//! This module defines the shared traits the rest of the crate is written against.
//!
//! 1.  `NaPrimitive` and its two refinements (`IntPrimitive`, `FloatPrimitive`)
//!     describe the primitives that can back a sentinel wrapper, including the
//!     raw, missing-ignorant arithmetic used by the batch kernels.
//! 2.  `NaValue` is the uniform "value or missing" contract every wrapper honours.
//! 3.  `TernaryEq` / `TernaryOrd` are the three-valued comparison contract,
//!     blanket-implemented once for every `NaValue`.
//! 4.  `SentinelWrapper` links a sentinel wrapper to its raw primitive so that
//!     sequences can be reinterpreted without copying.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use bytemuck::Pod;
use num_traits::{
    CheckedRem, Float, NumCast, One, PrimInt, SaturatingAdd, SaturatingMul,
    SaturatingSub, WrappingAdd, WrappingMul, WrappingSub, Zero,
};

use crate::error::NumericsError;
use crate::types::Trilean;

//==================================================================================
// 1. Primitive Capability Traits
//==================================================================================

/// A primitive with one reserved representable value meaning "missing".
///
/// The `raw_*` operations never inspect the sentinel. They are the kernels the
/// compute-then-patch strategy runs before its correction pass.
pub trait NaPrimitive:
    Pod + PartialOrd + Zero + One + NumCast + Debug + Display + FromStr + Default + Send + Sync
{
    /// The reserved value. `MAX` for integers, NaN for floats.
    const SENTINEL: Self;

    fn is_sentinel(self) -> bool;

    fn raw_add(self, rhs: Self) -> Self;
    fn raw_sub(self, rhs: Self) -> Self;
    fn raw_mul(self, rhs: Self) -> Self;
    /// Integer division by zero (and `MIN / -1`) yields the sentinel.
    fn raw_div(self, rhs: Self) -> Self;
}

/// Bounded binary integers. The sentinel is `MAX`, so the usable range is
/// `[MIN, MAX - 1]`.
pub trait IntPrimitive:
    NaPrimitive
    + PrimInt
    + Hash
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + SaturatingAdd
    + SaturatingSub
    + SaturatingMul
    + CheckedRem
{
}

/// IEEE-754 floats. NaN is the sentinel, so no bit pattern is lost.
pub trait FloatPrimitive: NaPrimitive + Float {}

// Implement the traits for the primitive integer types.
macro_rules! impl_int_primitive {
    ($($t:ty),+) => {
        $(
            impl NaPrimitive for $t {
                const SENTINEL: Self = <$t>::MAX;

                #[inline]
                fn is_sentinel(self) -> bool {
                    self == <$t>::MAX
                }
                #[inline]
                fn raw_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }
                #[inline]
                fn raw_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }
                #[inline]
                fn raw_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }
                #[inline]
                fn raw_div(self, rhs: Self) -> Self {
                    self.checked_div(rhs).unwrap_or(<$t>::MAX)
                }
            }

            impl IntPrimitive for $t {}
        )+
    };
}

macro_rules! impl_float_primitive {
    ($($t:ty),+) => {
        $(
            impl NaPrimitive for $t {
                const SENTINEL: Self = <$t>::NAN;

                #[inline]
                fn is_sentinel(self) -> bool {
                    self.is_nan()
                }
                #[inline]
                fn raw_add(self, rhs: Self) -> Self {
                    self + rhs
                }
                #[inline]
                fn raw_sub(self, rhs: Self) -> Self {
                    self - rhs
                }
                #[inline]
                fn raw_mul(self, rhs: Self) -> Self {
                    self * rhs
                }
                #[inline]
                fn raw_div(self, rhs: Self) -> Self {
                    self / rhs
                }
            }

            impl FloatPrimitive for $t {}
        )+
    };
}

impl_int_primitive!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_float_primitive!(f32, f64);

//==================================================================================
// 2. The "Value or Missing" Contract
//==================================================================================

/// Uniform access to a possibly-missing value.
pub trait NaValue {
    type Value;

    /// `None` when missing.
    fn value_ref(&self) -> Option<&Self::Value>;

    fn has_value(&self) -> bool {
        self.value_ref().is_some()
    }

    fn is_missing(&self) -> bool {
        !self.has_value()
    }

    /// Reading a missing value is an error, never a silent default.
    fn value(&self) -> Result<&Self::Value, NumericsError> {
        self.value_ref().ok_or(NumericsError::MissingValue)
    }
}

//==================================================================================
// 3. Three-Valued Comparison Contract
//==================================================================================

/// Equality in both of its forms.
///
/// `equals` is value-equality: two missing values are equal, so wrappers can
/// live in hashed and ordered containers (see `types::ByValue`). It is kept
/// apart from `PartialEq`, under which missing equals nothing, itself included.
pub trait TernaryEq {
    /// `Unknown` whenever either side is missing.
    fn ternary_eq(&self, other: &Self) -> Trilean;

    /// Value-equality: missing equals missing.
    fn equals(&self, other: &Self) -> bool;

    fn ternary_ne(&self, other: &Self) -> Trilean {
        !self.ternary_eq(other)
    }

    /// Both present and equal. Agrees with `PartialEq`.
    fn eq_and_neither_missing(&self, other: &Self) -> bool {
        self.ternary_eq(other).is_true()
    }

    fn eq_or_both_missing(&self, other: &Self) -> bool {
        self.equals(other)
    }

    /// Equal, or at least one side unknown.
    fn eq_or_either_missing(&self, other: &Self) -> bool {
        !self.ternary_eq(other).is_false()
    }
}

/// Ordering in three-valued logic plus a total order that puts missing first.
pub trait TernaryOrd: TernaryEq {
    /// `None` when either side is missing or the values are incomparable.
    fn ternary_cmp(&self, other: &Self) -> Option<Ordering>;

    /// Missing sorts before every present value; two missing values tie.
    fn cmp_missing_first(&self, other: &Self) -> Ordering;

    fn ternary_lt(&self, other: &Self) -> Trilean {
        self.ternary_cmp(other)
            .map_or(Trilean::Unknown, |o| Trilean::from(o == Ordering::Less))
    }

    fn ternary_le(&self, other: &Self) -> Trilean {
        self.ternary_cmp(other)
            .map_or(Trilean::Unknown, |o| Trilean::from(o != Ordering::Greater))
    }

    fn ternary_gt(&self, other: &Self) -> Trilean {
        self.ternary_cmp(other)
            .map_or(Trilean::Unknown, |o| Trilean::from(o == Ordering::Greater))
    }

    fn ternary_ge(&self, other: &Self) -> Trilean {
        self.ternary_cmp(other)
            .map_or(Trilean::Unknown, |o| Trilean::from(o != Ordering::Less))
    }
}

impl<W> TernaryEq for W
where
    W: NaValue,
    W::Value: PartialEq,
{
    fn ternary_eq(&self, other: &Self) -> Trilean {
        match (self.value_ref(), other.value_ref()) {
            (Some(a), Some(b)) => Trilean::from(a == b),
            _ => Trilean::Unknown,
        }
    }

    fn equals(&self, other: &Self) -> bool {
        match (self.value_ref(), other.value_ref()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl<W> TernaryOrd for W
where
    W: NaValue,
    W::Value: PartialOrd,
{
    fn ternary_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.value_ref(), other.value_ref()) {
            (Some(a), Some(b)) => a.partial_cmp(b),
            _ => None,
        }
    }

    fn cmp_missing_first(&self, other: &Self) -> Ordering {
        match (self.value_ref(), other.value_ref()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        }
    }
}

//==================================================================================
// 4. Sentinel Wrapper Link
//==================================================================================

/// A wrapper whose layout is exactly its raw primitive.
///
/// Every raw bit pattern is a valid wrapper: the sentinel simply decodes as
/// missing. This is what makes writing raw kernel output through
/// `as_raw_slice_mut` sound.
pub trait SentinelWrapper: NaValue + Copy + Send + Sync + 'static {
    type Raw: NaPrimitive;

    const MISSING: Self;

    /// Total: the sentinel becomes missing.
    fn from_raw(raw: Self::Raw) -> Self;

    fn into_raw(self) -> Self::Raw;

    fn as_raw_slice(values: &[Self]) -> &[Self::Raw];

    fn as_raw_slice_mut(values: &mut [Self]) -> &mut [Self::Raw];

    fn from_raw_slice(raw: &[Self::Raw]) -> &[Self];
}
