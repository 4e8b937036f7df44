//! `SentinelFloat<T>`: an IEEE-754 float whose native NaN doubles as "missing".
//!
//! No bit pattern is reserved beyond NaN itself, so arithmetic needs no extra
//! checks: IEEE-754 already propagates NaN, and `0.0 / 0.0` lands on missing.

use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};
use std::str::FromStr;

use bytemuck::{Pod, TransparentWrapper, Zeroable};
use num_traits::{Float, NumCast};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NumericsError;
use crate::traits::{FloatPrimitive, IntPrimitive, NaValue, SentinelWrapper};
use crate::types::{SentinelInt, MISSING_TOKEN};

#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct SentinelFloat<T>(T);

// SAFETY: `repr(transparent)` over a `Pod` float; every bit pattern is valid.
unsafe impl<T: FloatPrimitive> Zeroable for SentinelFloat<T> {}
unsafe impl<T: FloatPrimitive> Pod for SentinelFloat<T> {}
unsafe impl<T: FloatPrimitive> TransparentWrapper<T> for SentinelFloat<T> {}

//==================================================================================
// 1. Construction & Access
//==================================================================================

impl<T: FloatPrimitive> SentinelFloat<T> {
    pub const MISSING: Self = SentinelFloat(T::SENTINEL);

    /// Wraps `value`, refusing NaN.
    pub fn new(value: T) -> Result<Self, NumericsError> {
        if value.is_sentinel() {
            return Err(NumericsError::ReservedSentinel(value.to_string()));
        }
        Ok(SentinelFloat(value))
    }

    /// Reinterprets a raw value. Any NaN becomes `MISSING`.
    #[inline]
    pub const fn from_raw(raw: T) -> Self {
        SentinelFloat(raw)
    }

    #[inline]
    pub fn into_raw(self) -> T {
        self.0
    }

    #[inline]
    pub fn has_value(self) -> bool {
        !self.0.is_nan()
    }

    #[inline]
    pub fn is_missing(self) -> bool {
        self.0.is_nan()
    }

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

    pub fn from_option(value: Option<T>) -> Result<Self, NumericsError> {
        value.map_or(Ok(Self::MISSING), Self::new)
    }

    pub fn increment(self) -> Self {
        SentinelFloat(self.0 + T::one())
    }

    pub fn decrement(self) -> Self {
        SentinelFloat(self.0 - T::one())
    }

    /// Finite with no fractional part.
    pub fn is_integer(self) -> bool {
        self.0.is_finite() && self.0.fract() == T::zero()
    }

    pub fn max_magnitude(self, other: Self) -> Self {
        if self.is_missing() || other.is_missing() {
            return Self::MISSING;
        }
        if other.0.abs() > self.0.abs() {
            other
        } else {
            self
        }
    }

    pub fn min_magnitude(self, other: Self) -> Self {
        if self.is_missing() || other.is_missing() {
            return Self::MISSING;
        }
        if other.0.abs() < self.0.abs() {
            other
        } else {
            self
        }
    }

    /// Missing fails with `MissingValue`; out-of-range fails with `Conversion`.
    pub fn to_checked<U: NumCast>(self) -> Result<U, NumericsError> {
        let value = self.get()?;
        <U as NumCast>::from(value).ok_or_else(|| {
            NumericsError::Conversion(format!(
                "{} is out of range for {}",
                value,
                std::any::type_name::<U>()
            ))
        })
    }

    /// Converts to another float width. Missing stays missing.
    pub fn cast<U: FloatPrimitive>(self) -> Result<SentinelFloat<U>, NumericsError> {
        match self.to_option() {
            None => Ok(SentinelFloat::MISSING),
            Some(v) => <U as NumCast>::from(v)
                .map(SentinelFloat::from_raw)
                .ok_or_else(|| {
                    NumericsError::Conversion(format!(
                        "{} cannot be represented as {}",
                        v,
                        std::any::type_name::<U>()
                    ))
                }),
        }
    }

    /// Converts to the integer family, truncating toward zero.
    /// Missing stays missing; out-of-range values fail.
    pub fn to_int<U: IntPrimitive>(self) -> Result<SentinelInt<U>, NumericsError> {
        match self.to_option() {
            None => Ok(SentinelInt::MISSING),
            Some(v) => SentinelInt::from_checked(v),
        }
    }
}

impl<T: FloatPrimitive> NaValue for SentinelFloat<T> {
    type Value = T;

    #[inline]
    fn value_ref(&self) -> Option<&T> {
        if self.0.is_nan() {
            None
        } else {
            Some(&self.0)
        }
    }
}

impl<T: FloatPrimitive> SentinelWrapper for SentinelFloat<T> {
    type Raw = T;

    const MISSING: Self = SentinelFloat(T::SENTINEL);

    #[inline]
    fn from_raw(raw: T) -> Self {
        SentinelFloat(raw)
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

macro_rules! impl_try_from_primitive {
    ($($t:ty),+) => {
        $(
            impl TryFrom<$t> for SentinelFloat<$t> {
                type Error = NumericsError;

                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    SentinelFloat::new(value)
                }
            }
        )+
    };
}

impl_try_from_primitive!(f32, f64);

//==================================================================================
// 2. Equality & Ordering (native NaN semantics)
//==================================================================================

impl<T: FloatPrimitive> PartialEq for SentinelFloat<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: FloatPrimitive> PartialOrd for SentinelFloat<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

//==================================================================================
// 3. Lifted Arithmetic
//==================================================================================

macro_rules! impl_native_binary_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl<T: FloatPrimitive> $Op for SentinelFloat<T> {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: Self) -> Self {
                SentinelFloat($Op::$op(self.0, rhs.0))
            }
        }

        impl<T: FloatPrimitive> $Op<T> for SentinelFloat<T> {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: T) -> Self {
                SentinelFloat($Op::$op(self.0, rhs))
            }
        }

        impl<T: FloatPrimitive> $OpAssign for SentinelFloat<T> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

impl_native_binary_op!(Add, add, AddAssign, add_assign);
impl_native_binary_op!(Sub, sub, SubAssign, sub_assign);
impl_native_binary_op!(Mul, mul, MulAssign, mul_assign);
impl_native_binary_op!(Div, div, DivAssign, div_assign);
impl_native_binary_op!(Rem, rem, RemAssign, rem_assign);

impl<T: FloatPrimitive> Neg for SentinelFloat<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        SentinelFloat(-self.0)
    }
}

/// Naive left-to-right sum; see `stats::sum_float` for compensation.
impl<T: FloatPrimitive> Sum for SentinelFloat<T> {
    fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        iter.try_fold(T::zero(), |acc, x| x.to_option().map(|v| acc + v))
            .map_or(Self::MISSING, SentinelFloat)
    }
}

impl<'a, T: FloatPrimitive> Sum<&'a SentinelFloat<T>> for SentinelFloat<T> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<T: FloatPrimitive> Product for SentinelFloat<T> {
    fn product<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        iter.try_fold(T::one(), |acc, x| x.to_option().map(|v| acc * v))
            .map_or(Self::MISSING, SentinelFloat)
    }
}

//==================================================================================
// 4. Text & Serde
//==================================================================================

impl<T: FloatPrimitive> fmt::Display for SentinelFloat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_option() {
            Some(v) => fmt::Display::fmt(&v, f),
            None => f.write_str(MISSING_TOKEN),
        }
    }
}

impl<T: FloatPrimitive> fmt::Debug for SentinelFloat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_option() {
            Some(v) => fmt::Debug::fmt(&v, f),
            None => f.write_str(MISSING_TOKEN),
        }
    }
}

/// `NA` parses to `MISSING`; a literal `NaN` is rejected as the reserved sentinel.
impl<T: FloatPrimitive> FromStr for SentinelFloat<T> {
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

impl<T: FloatPrimitive + Serialize> Serialize for SentinelFloat<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_option().serialize(serializer)
    }
}

impl<'de, T: FloatPrimitive + Deserialize<'de>> Deserialize<'de> for SentinelFloat<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<T>::deserialize(deserializer)?;
        SentinelFloat::from_option(value).map_err(serde::de::Error::custom)
    }
}

//==================================================================================
// 5. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{TernaryEq, TernaryOrd};
    use crate::types::Trilean;

    type NaF64 = SentinelFloat<f64>;

    fn w(v: f64) -> NaF64 {
        NaF64::new(v).unwrap()
    }

    #[test]
    fn test_nan_is_rejected_at_construction() {
        assert!(matches!(
            NaF64::new(f64::NAN),
            Err(NumericsError::ReservedSentinel(_))
        ));
        assert!(NaF64::try_from(1.5).is_ok());
    }

    #[test]
    fn test_missing_contract() {
        let na = NaF64::MISSING;
        assert!(!na.has_value());
        assert!(na.equals(&na));
        assert!(na != na);
        assert_eq!(na.ternary_lt(&w(1.0)), Trilean::Unknown);
        assert_eq!(na.cmp_missing_first(&w(-1.0e300)), Ordering::Less);
    }

    #[test]
    fn test_division_is_ieee() {
        assert!((w(0.0) / w(0.0)).is_missing());
        assert_eq!((w(1.0) / w(0.0)).get().unwrap(), f64::INFINITY);
        assert_eq!(w(7.0) / w(2.0), w(3.5));
    }

    #[test]
    fn test_closure_over_missing() {
        let na = NaF64::MISSING;
        let x = w(2.0);
        for result in [na + x, x - na, na * x, x / na, na % x, -na, na.increment()] {
            assert!(result.is_missing());
        }
    }

    #[test]
    fn test_text_round_trip() {
        for v in [-2.5, 0.0, 1.0e-12, 3.0e20] {
            assert_eq!(w(v).to_string().parse::<NaF64>().unwrap(), w(v));
        }
        assert!("NA".parse::<NaF64>().unwrap().is_missing());
        assert!(matches!(
            "NaN".parse::<NaF64>(),
            Err(NumericsError::ReservedSentinel(_))
        ));
    }

    #[test]
    fn test_cross_family_conversions() {
        assert!(NaF64::MISSING.to_int::<i32>().unwrap().is_missing());
        assert_eq!(w(-3.9).to_int::<i32>().unwrap().get().unwrap(), -3);
        assert!(w(1.0e12).to_int::<i32>().is_err());
        assert!(w(127.0).to_int::<i8>().is_err());
        assert!(NaF64::MISSING.cast::<f32>().unwrap().is_missing());
    }

    #[test]
    fn test_magnitude_and_integer_predicate() {
        assert_eq!(w(-4.0).max_magnitude(w(3.0)), w(-4.0));
        assert_eq!(w(-4.0).min_magnitude(w(3.0)), w(3.0));
        assert!(w(2.0).is_integer());
        assert!(!w(2.5).is_integer());
        assert!(!NaF64::MISSING.is_integer());
    }
}
