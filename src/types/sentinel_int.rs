//! `SentinelInt<T>`: a bounded integer that reserves `T::MAX` as "missing".
//!
//! The wrapper is `#[repr(transparent)]`, so `&[SentinelInt<T>]` and `&[T]`
//! share one layout and batch kernels can run over either. Arithmetic is
//! lifted: a missing operand yields a missing result. Integer arithmetic wraps
//! exactly like the batch kernels, and a wrapped result that lands on the
//! sentinel reads as missing.

use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, Shr, Sub, SubAssign,
};
use std::str::FromStr;

use bytemuck::{Pod, TransparentWrapper, Zeroable};
use num_traits::{AsPrimitive, CheckedRem, NumCast, PrimInt, Signed, ToPrimitive, WrappingMul};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NumericsError;
use crate::traits::{FloatPrimitive, IntPrimitive, NaPrimitive, NaValue, SentinelWrapper};
use crate::types::{SentinelFloat, MISSING_TOKEN};

#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct SentinelInt<T>(T);

// SAFETY: `repr(transparent)` over a `Pod` integer, and every bit pattern is a
// valid wrapper (the sentinel decodes as missing).
unsafe impl<T: IntPrimitive> Zeroable for SentinelInt<T> {}
unsafe impl<T: IntPrimitive> Pod for SentinelInt<T> {}
unsafe impl<T: IntPrimitive> TransparentWrapper<T> for SentinelInt<T> {}

//==================================================================================
// 1. Construction & Access
//==================================================================================

impl<T: IntPrimitive> SentinelInt<T> {
    /// The missing value. Holds `T::MAX` internally.
    pub const MISSING: Self = SentinelInt(T::SENTINEL);

    /// Wraps `value`, refusing the reserved sentinel.
    pub fn new(value: T) -> Result<Self, NumericsError> {
        if value.is_sentinel() {
            return Err(NumericsError::ReservedSentinel(value.to_string()));
        }
        Ok(SentinelInt(value))
    }

    /// Reinterprets a raw value. The sentinel becomes `MISSING`.
    #[inline]
    pub const fn from_raw(raw: T) -> Self {
        SentinelInt(raw)
    }

    #[inline]
    pub fn into_raw(self) -> T {
        self.0
    }

    #[inline]
    pub fn has_value(self) -> bool {
        !self.0.is_sentinel()
    }

    #[inline]
    pub fn is_missing(self) -> bool {
        self.0.is_sentinel()
    }

    /// The underlying value, or `MissingValue`.
    pub fn get(self) -> Result<T, NumericsError> {
        self.to_option().ok_or(NumericsError::MissingValue)
    }

    #[inline]
    pub fn to_option(self) -> Option<T> {
        if self.is_missing() {
            None
        } else {
            Some(self.0)
        }
    }

    /// `None` maps to `MISSING`; `Some(sentinel)` is rejected.
    pub fn from_option(value: Option<T>) -> Result<Self, NumericsError> {
        value.map_or(Ok(Self::MISSING), Self::new)
    }

    pub fn increment(self) -> Self {
        self + T::one()
    }

    pub fn decrement(self) -> Self {
        self - T::one()
    }

    #[inline]
    fn lift(self, rhs: Self, op: impl FnOnce(T, T) -> T) -> Self {
        if self.is_missing() || rhs.is_missing() {
            Self::MISSING
        } else {
            SentinelInt(op(self.0, rhs.0))
        }
    }

    // --- Classification -------------------------------------------------------

    pub fn is_positive(self) -> bool {
        self.to_option().map_or(false, |v| v > T::zero())
    }

    pub fn is_negative(self) -> bool {
        self.to_option().map_or(false, |v| v < T::zero())
    }

    pub fn is_even(self) -> bool {
        self.to_option()
            .map_or(false, |v| v & T::one() == T::zero())
    }

    pub fn is_odd(self) -> bool {
        self.to_option()
            .map_or(false, |v| v & T::one() == T::one())
    }

    /// Missing reads as not-a-number, matching the float family.
    pub fn is_nan(self) -> bool {
        self.is_missing()
    }

    /// Whichever operand has the larger absolute value; ties favour `self`.
    pub fn max_magnitude(self, other: Self) -> Self {
        self.lift(other, |a, b| if magnitude(b) > magnitude(a) { b } else { a })
    }

    /// Whichever operand has the smaller absolute value; ties favour `self`.
    pub fn min_magnitude(self, other: Self) -> Self {
        self.lift(other, |a, b| if magnitude(b) < magnitude(a) { b } else { a })
    }

    // --- Binary Integer -------------------------------------------------------

    #[inline]
    fn map_raw(self, op: impl FnOnce(T) -> T) -> Self {
        match self.to_option() {
            Some(v) => SentinelInt(op(v)),
            None => Self::MISSING,
        }
    }

    pub fn count_ones(self) -> Option<u32> {
        self.to_option().map(PrimInt::count_ones)
    }

    pub fn count_zeros(self) -> Option<u32> {
        self.to_option().map(PrimInt::count_zeros)
    }

    pub fn leading_zeros(self) -> Option<u32> {
        self.to_option().map(PrimInt::leading_zeros)
    }

    pub fn trailing_zeros(self) -> Option<u32> {
        self.to_option().map(PrimInt::trailing_zeros)
    }

    /// Floor of the base-2 logarithm. `None` when missing or not positive.
    pub fn ilog2(self) -> Option<u32> {
        self.to_option()
            .filter(|&v| v > T::zero())
            .map(|v| bit_width::<T>() - 1 - PrimInt::leading_zeros(v))
    }

    pub fn is_power_of_two(self) -> bool {
        self.to_option()
            .map_or(false, |v| v > T::zero() && PrimInt::count_ones(v) == 1)
    }

    /// Wrapping exponentiation, like the other lifted operators.
    pub fn pow(self, exp: u32) -> Self {
        self.map_raw(|v| wrapping_pow(v, exp))
    }

    pub fn rotate_left(self, n: u32) -> Self {
        self.map_raw(|v| PrimInt::rotate_left(v, n))
    }

    pub fn rotate_right(self, n: u32) -> Self {
        self.map_raw(|v| PrimInt::rotate_right(v, n))
    }

    pub fn reverse_bits(self) -> Self {
        self.map_raw(PrimInt::reverse_bits)
    }

    /// Byte order helpers. A present value whose reordered bytes spell the
    /// sentinel reads as missing, and missing stays missing.
    pub fn swap_bytes(self) -> Self {
        self.map_raw(PrimInt::swap_bytes)
    }

    pub fn to_be(self) -> Self {
        self.map_raw(PrimInt::to_be)
    }

    pub fn to_le(self) -> Self {
        self.map_raw(PrimInt::to_le)
    }

    pub fn from_be(value: Self) -> Self {
        value.map_raw(PrimInt::from_be)
    }

    pub fn from_le(value: Self) -> Self {
        value.map_raw(PrimInt::from_le)
    }

    // --- Conversions ----------------------------------------------------------

    /// Fails when `value` does not fit in `T` or would be the sentinel.
    pub fn from_checked<U>(value: U) -> Result<Self, NumericsError>
    where
        U: ToPrimitive + fmt::Display + Copy,
    {
        let converted = <T as NumCast>::from(value).ok_or_else(|| {
            NumericsError::Conversion(format!(
                "{} is out of range for {}",
                value,
                std::any::type_name::<T>()
            ))
        })?;
        Self::new(converted)
    }

    /// Clamps into `[T::MIN, T::MAX - 1]`. A NaN input becomes `MISSING`.
    pub fn from_saturating<U>(value: U) -> Self
    where
        U: ToPrimitive + Copy,
    {
        match <T as NumCast>::from(value) {
            Some(v) if v.is_sentinel() => SentinelInt(v - T::one()),
            Some(v) => SentinelInt(v),
            None => match value.to_f64() {
                Some(f) if f.is_nan() => Self::MISSING,
                Some(f) if f < 0.0 => SentinelInt(T::min_value()),
                _ => SentinelInt(T::max_value() - T::one()),
            },
        }
    }

    /// Truncates like an `as` cast. A result equal to the sentinel reads as missing.
    pub fn from_truncating<U>(value: U) -> Self
    where
        U: AsPrimitive<T>,
    {
        SentinelInt(value.as_())
    }

    /// Missing fails with `MissingValue`; out-of-range fails with `Conversion`.
    pub fn to_checked<U>(self) -> Result<U, NumericsError>
    where
        U: NumCast,
    {
        let value = self.get()?;
        <U as NumCast>::from(value).ok_or_else(|| {
            NumericsError::Conversion(format!(
                "{} is out of range for {}",
                value,
                std::any::type_name::<U>()
            ))
        })
    }

    /// Converts to another integer family. Missing stays missing.
    pub fn cast<U: IntPrimitive>(self) -> Result<SentinelInt<U>, NumericsError> {
        match self.to_option() {
            None => Ok(SentinelInt::MISSING),
            Some(v) => SentinelInt::from_checked(v),
        }
    }

    /// Converts to the float family. Missing becomes NaN.
    pub fn to_float<F: FloatPrimitive>(self) -> Result<SentinelFloat<F>, NumericsError> {
        match self.to_option() {
            None => Ok(SentinelFloat::MISSING),
            Some(v) => <F as NumCast>::from(v)
                .map(SentinelFloat::from_raw)
                .ok_or_else(|| {
                    NumericsError::Conversion(format!(
                        "{} cannot be represented as {}",
                        v,
                        std::any::type_name::<F>()
                    ))
                }),
        }
    }
}

/// Number of bits in `T`.
pub(crate) fn bit_width<T: IntPrimitive>() -> u32 {
    (std::mem::size_of::<T>() * 8) as u32
}

fn wrapping_pow<T: IntPrimitive>(mut base: T, mut exp: u32) -> T {
    let mut acc = T::one();
    while exp > 0 {
        if exp & 1 == 1 {
            acc = WrappingMul::wrapping_mul(&acc, &base);
        }
        exp >>= 1;
        if exp > 0 {
            base = WrappingMul::wrapping_mul(&base, &base);
        }
    }
    acc
}

fn magnitude<T: IntPrimitive>(v: T) -> u128 {
    v.to_i128().map_or(u128::MAX, |x| x.unsigned_abs())
}

impl<T: IntPrimitive> NaValue for SentinelInt<T> {
    type Value = T;

    #[inline]
    fn value_ref(&self) -> Option<&T> {
        if self.0.is_sentinel() {
            None
        } else {
            Some(&self.0)
        }
    }
}

impl<T: IntPrimitive> SentinelWrapper for SentinelInt<T> {
    type Raw = T;

    const MISSING: Self = SentinelInt(T::SENTINEL);

    #[inline]
    fn from_raw(raw: T) -> Self {
        SentinelInt(raw)
    }

    #[inline]
    fn into_raw(self) -> T {
        self.0
    }

    fn as_raw_slice(values: &[Self]) -> &[T] {
        <Self as TransparentWrapper<T>>::peel_slice(values)
    }

    fn as_raw_slice_mut(values: &mut [Self]) -> &mut [T] {
        <Self as TransparentWrapper<T>>::peel_slice_mut(values)
    }

    fn from_raw_slice(raw: &[T]) -> &[Self] {
        <Self as TransparentWrapper<T>>::wrap_slice(raw)
    }
}

// Concrete `TryFrom` impls: a generic one would overlap core's blanket impl.
macro_rules! impl_try_from_primitive {
    ($($t:ty),+) => {
        $(
            impl TryFrom<$t> for SentinelInt<$t> {
                type Error = NumericsError;

                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    SentinelInt::new(value)
                }
            }
        )+
    };
}

impl_try_from_primitive!(i8, i16, i32, i64, u8, u16, u32, u64);

//==================================================================================
// 2. Equality & Ordering
//==================================================================================

/// The comparison operator: missing equals nothing, itself included.
/// Use `TernaryEq::equals` for value-equality.
impl<T: IntPrimitive> PartialEq for SentinelInt<T> {
    fn eq(&self, other: &Self) -> bool {
        self.has_value() && other.has_value() && self.0 == other.0
    }
}

impl<T: IntPrimitive> PartialOrd for SentinelInt<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_missing() || other.is_missing() {
            None
        } else {
            self.0.partial_cmp(&other.0)
        }
    }
}

//==================================================================================
// 3. Lifted Arithmetic
//==================================================================================

macro_rules! impl_lifted_binary_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $raw:path) => {
        impl<T: IntPrimitive> $Op for SentinelInt<T> {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: Self) -> Self {
                self.lift(rhs, $raw)
            }
        }

        impl<T: IntPrimitive> $Op<T> for SentinelInt<T> {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: T) -> Self {
                self.lift(SentinelInt(rhs), $raw)
            }
        }

        impl<T: IntPrimitive> $OpAssign for SentinelInt<T> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

impl_lifted_binary_op!(Add, add, AddAssign, add_assign, NaPrimitive::raw_add);
impl_lifted_binary_op!(Sub, sub, SubAssign, sub_assign, NaPrimitive::raw_sub);
impl_lifted_binary_op!(Mul, mul, MulAssign, mul_assign, NaPrimitive::raw_mul);
impl_lifted_binary_op!(Div, div, DivAssign, div_assign, NaPrimitive::raw_div);
impl_lifted_binary_op!(Rem, rem, RemAssign, rem_assign, raw_rem);

#[inline]
fn raw_rem<T: IntPrimitive>(a: T, b: T) -> T {
    CheckedRem::checked_rem(&a, &b).unwrap_or(T::SENTINEL)
}

macro_rules! impl_lifted_bit_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $sym:tt) => {
        impl<T: IntPrimitive> $Op for SentinelInt<T> {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: Self) -> Self {
                self.lift(rhs, |a, b| a $sym b)
            }
        }

        impl<T: IntPrimitive> $OpAssign for SentinelInt<T> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

impl_lifted_bit_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_lifted_bit_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_lifted_bit_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl<T: IntPrimitive> Not for SentinelInt<T> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        self.map_raw(|v| !v)
    }
}

/// Shifting by the bit width or more yields missing instead of panicking.
impl<T: IntPrimitive> Shl<usize> for SentinelInt<T> {
    type Output = Self;

    #[inline]
    fn shl(self, n: usize) -> Self {
        if n >= bit_width::<T>() as usize {
            Self::MISSING
        } else {
            self.map_raw(|v| v << n)
        }
    }
}

/// Arithmetic shift for signed `T`, logical for unsigned.
impl<T: IntPrimitive> Shr<usize> for SentinelInt<T> {
    type Output = Self;

    #[inline]
    fn shr(self, n: usize) -> Self {
        if n >= bit_width::<T>() as usize {
            Self::MISSING
        } else {
            self.map_raw(|v| v >> n)
        }
    }
}

impl<T: IntPrimitive + Signed> Neg for SentinelInt<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.is_missing() {
            Self::MISSING
        } else {
            SentinelInt(T::zero().raw_sub(self.0))
        }
    }
}

/// Stops at the first missing element.
impl<T: IntPrimitive> Sum for SentinelInt<T> {
    fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        iter.try_fold(T::zero(), |acc, x| x.to_option().map(|v| acc.raw_add(v)))
            .map_or(Self::MISSING, SentinelInt)
    }
}

impl<'a, T: IntPrimitive> Sum<&'a SentinelInt<T>> for SentinelInt<T> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<T: IntPrimitive> Product for SentinelInt<T> {
    fn product<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        iter.try_fold(T::one(), |acc, x| x.to_option().map(|v| acc.raw_mul(v)))
            .map_or(Self::MISSING, SentinelInt)
    }
}

//==================================================================================
// 4. Text & Serde
//==================================================================================

impl<T: IntPrimitive> fmt::Display for SentinelInt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_option() {
            Some(v) => fmt::Display::fmt(&v, f),
            None => f.write_str(MISSING_TOKEN),
        }
    }
}

impl<T: IntPrimitive> fmt::Debug for SentinelInt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_option() {
            Some(v) => fmt::Debug::fmt(&v, f),
            None => f.write_str(MISSING_TOKEN),
        }
    }
}

/// `NA` (case-sensitive) parses to `MISSING`. Parsing the sentinel is rejected.
impl<T: IntPrimitive> FromStr for SentinelInt<T> {
    type Err = NumericsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == MISSING_TOKEN {
            return Ok(Self::MISSING);
        }
        let value = s
            .parse::<T>()
            .map_err(|_| NumericsError::Parse(s.to_string()))?;
        Self::new(value)
    }
}

/// Serialized as an optional value: `null` is missing.
impl<T: IntPrimitive + Serialize> Serialize for SentinelInt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_option().serialize(serializer)
    }
}

impl<'de, T: IntPrimitive + Deserialize<'de>> Deserialize<'de> for SentinelInt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<T>::deserialize(deserializer)?;
        SentinelInt::from_option(value).map_err(serde::de::Error::custom)
    }
}

//==================================================================================
// 5. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TernaryEq;
    use crate::types::Trilean;

    type NaI8 = SentinelInt<i8>;

    fn w(v: i8) -> NaI8 {
        NaI8::new(v).unwrap()
    }

    #[test]
    fn test_eight_bit_scenario() {
        assert_eq!(w(5) + w(10), w(15));
        assert!((NaI8::MISSING + w(10)).is_missing());
        assert!(matches!(
            NaI8::new(127),
            Err(NumericsError::ReservedSentinel(_))
        ));
    }

    #[test]
    fn test_missing_equality_asymmetry() {
        let na = NaI8::MISSING;
        assert!(!na.has_value());
        assert!(na.equals(&na));
        assert!(na != na);
        assert_eq!(na.ternary_eq(&na), Trilean::Unknown);
    }

    #[test]
    fn test_operator_and_value_equality_agree_for_present_values() {
        for a in [-128i8, -1, 0, 1, 126] {
            for b in [-128i8, 0, 126] {
                assert_eq!(w(a) == w(b), a == b);
                assert_eq!(w(a).equals(&w(b)), a == b);
            }
        }
    }

    #[test]
    fn test_addition_matches_raw_addition() {
        for (a, b) in [(1i32, 2i32), (-50, 20), (1_000_000, -999_999), (0, 0)] {
            let lifted = SentinelInt::new(a).unwrap() + SentinelInt::new(b).unwrap();
            assert_eq!(lifted, SentinelInt::new(a + b).unwrap());
        }
    }

    #[test]
    fn test_closure_over_missing() {
        let na = NaI8::MISSING;
        let x = w(3);
        for result in [
            na + x,
            x + na,
            na - x,
            x - na,
            na * x,
            x * na,
            na / x,
            x / na,
            na % x,
            x % na,
            -na,
            na.increment(),
            na.decrement(),
        ] {
            assert!(result.is_missing());
        }
    }

    #[test]
    fn test_integer_division_by_zero_is_missing() {
        assert!((w(10) / w(0)).is_missing());
        assert!((w(10) % w(0)).is_missing());
        assert!((w(10) / 0i8).is_missing());
        assert!((w(-128) / w(-1)).is_missing());
        assert_eq!(w(10) / w(3), w(3));
    }

    #[test]
    fn test_wrapping_result_on_sentinel_reads_missing() {
        assert!((w(126) + w(1)).is_missing());
        assert_eq!(w(126) + w(2), w(-128));
        assert!((-w(-127)).is_missing());
    }

    #[test]
    fn test_get_on_missing_fails() {
        assert_eq!(w(4).get().unwrap(), 4);
        assert!(matches!(
            NaI8::MISSING.get(),
            Err(NumericsError::MissingValue)
        ));
        assert!(matches!(
            NaI8::MISSING.value(),
            Err(NumericsError::MissingValue)
        ));
    }

    #[test]
    fn test_text_round_trip() {
        for v in [-128i8, -3, 0, 42, 126] {
            let text = w(v).to_string();
            assert_eq!(text.parse::<NaI8>().unwrap(), w(v));
        }
        assert_eq!(NaI8::MISSING.to_string(), "NA");
        assert!("NA".parse::<NaI8>().unwrap().is_missing());
        assert!(matches!("na".parse::<NaI8>(), Err(NumericsError::Parse(_))));
        assert!(matches!(
            "127".parse::<NaI8>(),
            Err(NumericsError::ReservedSentinel(_))
        ));
    }

    #[test]
    fn test_conversions() {
        assert!(SentinelInt::<u8>::from_checked(300i32).is_err());
        assert!(SentinelInt::<u8>::from_checked(255i32).is_err());
        assert_eq!(SentinelInt::<u8>::from_checked(254i32).unwrap().get().unwrap(), 254);

        assert_eq!(SentinelInt::<u8>::from_saturating(1000i32).into_raw(), 254);
        assert_eq!(SentinelInt::<u8>::from_saturating(-5i32).into_raw(), 0);
        assert!(SentinelInt::<u8>::from_saturating(f64::NAN).is_missing());

        assert!(SentinelInt::<u8>::from_truncating(511i32).is_missing());
        assert_eq!(SentinelInt::<u8>::from_truncating(258i32).into_raw(), 2);

        assert!(w(5).to_checked::<u8>().is_ok());
        assert!(w(-5).to_checked::<u8>().is_err());
    }

    #[test]
    fn test_cross_family_conversions_keep_missing() {
        assert!(NaI8::MISSING.to_float::<f64>().unwrap().is_missing());
        assert_eq!(w(7).to_float::<f64>().unwrap().get().unwrap(), 7.0);
        assert!(NaI8::MISSING.cast::<i64>().unwrap().is_missing());
        assert!(SentinelInt::new(1000i32).unwrap().cast::<i8>().is_err());
    }

    #[test]
    fn test_magnitude_and_classification() {
        assert_eq!(w(-9).max_magnitude(w(4)), w(-9));
        assert_eq!(w(-9).min_magnitude(w(4)), w(4));
        assert!(w(-9).max_magnitude(NaI8::MISSING).is_missing());
        assert!(w(4).is_even() && w(3).is_odd());
        assert!(!NaI8::MISSING.is_even() && !NaI8::MISSING.is_odd());
        assert!(NaI8::MISSING.is_nan());
    }

    #[test]
    fn test_iterator_sum_short_circuits() {
        let values = vec![w(1), w(2), w(3)];
        assert_eq!(values.iter().sum::<NaI8>(), w(6));
        let with_missing = vec![w(1), NaI8::MISSING, w(3)];
        assert!(with_missing.into_iter().sum::<NaI8>().is_missing());
        assert_eq!(vec![w(2), w(3)].into_iter().product::<NaI8>(), w(6));
    }

    #[test]
    fn test_layout_matches_primitive() {
        assert_eq!(std::mem::size_of::<NaI8>(), std::mem::size_of::<i8>());
        assert_eq!(
            std::mem::align_of::<SentinelInt<u64>>(),
            std::mem::align_of::<u64>()
        );
    }

    #[test]
    fn test_serde_uses_null_for_missing() {
        let values = vec![w(1), NaI8::MISSING];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, "[1,null]");
        let back: Vec<NaI8> = serde_json::from_str(&json).unwrap();
        assert!(back[0].equals(&values[0]) && back[1].is_missing());
        assert!(serde_json::from_str::<NaI8>("127").is_err());
    }
}
