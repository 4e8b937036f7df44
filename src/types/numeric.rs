//! `num-traits` implementations for the sentinel wrappers.
//!
//! Generic code written against `Num`, `Bounded`, `CheckedAdd`, `Float`, ...
//! runs unmodified over wrapped values. Every operation delegates to the
//! primitive and short-circuits on missing.
//!
//! `PrimInt` demands `Eq + Ord`, which `SentinelInt` cannot give (missing is
//! unequal to itself). It is implemented for `ByValue<SentinelInt<T>>`, whose
//! equality and order are total.

use std::num::FpCategory;

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Not, Rem, Shl, Shr, Sub};

use num_traits::{
    Bounded, CheckedAdd, CheckedDiv, CheckedMul, CheckedNeg, CheckedSub, Float, Num, NumCast, One,
    PrimInt, Saturating, SaturatingAdd, SaturatingMul, SaturatingSub, Signed, ToPrimitive,
    Unsigned, WrappingAdd, WrappingMul, WrappingSub, Zero,
};

use crate::error::NumericsError;
use crate::traits::{FloatPrimitive, IntPrimitive, NaPrimitive};
use crate::types::sentinel_int::bit_width;
use crate::types::{ByValue, SentinelFloat, SentinelInt, MISSING_TOKEN};

//==================================================================================
// 1. Integer Family
//==================================================================================

impl<T: IntPrimitive> Zero for SentinelInt<T> {
    fn zero() -> Self {
        SentinelInt::from_raw(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.into_raw().is_zero()
    }
}

impl<T: IntPrimitive> One for SentinelInt<T> {
    fn one() -> Self {
        SentinelInt::from_raw(T::one())
    }
}

impl<T: IntPrimitive> Num for SentinelInt<T> {
    type FromStrRadixErr = NumericsError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, NumericsError> {
        if s == MISSING_TOKEN {
            return Ok(Self::MISSING);
        }
        let value = <T as Num>::from_str_radix(s, radix)
            .map_err(|_| NumericsError::Parse(s.to_string()))?;
        SentinelInt::new(value)
    }
}

/// The maximum is one below the sentinel.
impl<T: IntPrimitive> Bounded for SentinelInt<T> {
    fn min_value() -> Self {
        SentinelInt::from_raw(<T as Bounded>::min_value())
    }

    fn max_value() -> Self {
        SentinelInt::from_raw(<T as Bounded>::max_value() - T::one())
    }
}

/// Missing has no integer representation; `to_f64`/`to_f32` yield NaN for it.
impl<T: IntPrimitive> ToPrimitive for SentinelInt<T> {
    fn to_i64(&self) -> Option<i64> {
        self.to_option().and_then(|v| v.to_i64())
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_option().and_then(|v| v.to_u64())
    }

    fn to_i128(&self) -> Option<i128> {
        self.to_option().and_then(|v| v.to_i128())
    }

    fn to_u128(&self) -> Option<u128> {
        self.to_option().and_then(|v| v.to_u128())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.to_option().and_then(|v| v.to_f64()).unwrap_or(f64::NAN))
    }

    fn to_f32(&self) -> Option<f32> {
        Some(self.to_option().and_then(|v| v.to_f32()).unwrap_or(f32::NAN))
    }
}

/// Casting NaN or the sentinel value yields `None`.
impl<T: IntPrimitive> NumCast for SentinelInt<T> {
    fn from<N: ToPrimitive>(n: N) -> Option<Self> {
        <T as NumCast>::from(n)
            .filter(|v| !v.is_sentinel())
            .map(SentinelInt::from_raw)
    }
}

macro_rules! impl_checked_int_op {
    ($Trait:ident, $method:ident) => {
        /// A missing operand gives `Some(MISSING)`; overflow, or a result
        /// landing on the sentinel, gives `None`.
        impl<T: IntPrimitive> $Trait for SentinelInt<T> {
            fn $method(&self, v: &Self) -> Option<Self> {
                match (self.to_option(), v.to_option()) {
                    (Some(a), Some(b)) => $Trait::$method(&a, &b)
                        .filter(|r| !r.is_sentinel())
                        .map(SentinelInt::from_raw),
                    _ => Some(Self::MISSING),
                }
            }
        }
    };
}

impl_checked_int_op!(CheckedAdd, checked_add);
impl_checked_int_op!(CheckedSub, checked_sub);
impl_checked_int_op!(CheckedMul, checked_mul);
impl_checked_int_op!(CheckedDiv, checked_div);

macro_rules! impl_saturating_int_op {
    ($Trait:ident, $method:ident) => {
        /// Clamps into `[MIN, MAX - 1]`; missing propagates.
        impl<T: IntPrimitive> $Trait for SentinelInt<T> {
            fn $method(&self, v: &Self) -> Self {
                match (self.to_option(), v.to_option()) {
                    (Some(a), Some(b)) => {
                        let r = $Trait::$method(&a, &b);
                        if r.is_sentinel() {
                            SentinelInt::from_raw(r - T::one())
                        } else {
                            SentinelInt::from_raw(r)
                        }
                    }
                    _ => Self::MISSING,
                }
            }
        }
    };
}

impl_saturating_int_op!(SaturatingAdd, saturating_add);
impl_saturating_int_op!(SaturatingSub, saturating_sub);
impl_saturating_int_op!(SaturatingMul, saturating_mul);

macro_rules! impl_wrapping_int_op {
    ($Trait:ident, $method:ident, $op:tt) => {
        /// Identical to the operator: wraps, and a sentinel result reads as missing.
        impl<T: IntPrimitive> $Trait for SentinelInt<T> {
            fn $method(&self, v: &Self) -> Self {
                *self $op *v
            }
        }
    };
}

impl_wrapping_int_op!(WrappingAdd, wrapping_add, +);
impl_wrapping_int_op!(WrappingSub, wrapping_sub, -);
impl_wrapping_int_op!(WrappingMul, wrapping_mul, *);

impl<T: IntPrimitive> Saturating for SentinelInt<T> {
    fn saturating_add(self, v: Self) -> Self {
        SaturatingAdd::saturating_add(&self, &v)
    }

    fn saturating_sub(self, v: Self) -> Self {
        SaturatingSub::saturating_sub(&self, &v)
    }
}

/// Missing gives `Some(MISSING)`. Negating a nonzero unsigned value, or a
/// negation landing on the sentinel, gives `None`.
impl<T: IntPrimitive> CheckedNeg for SentinelInt<T> {
    fn checked_neg(&self) -> Option<Self> {
        match self.to_option() {
            Some(v) => T::zero()
                .checked_sub(&v)
                .filter(|r| !r.is_sentinel())
                .map(SentinelInt::from_raw),
            None => Some(Self::MISSING),
        }
    }
}

impl<T: IntPrimitive + Signed> Signed for SentinelInt<T> {
    /// `abs(MIN)` does not fit and yields missing.
    fn abs(&self) -> Self {
        match self.to_option() {
            Some(v) if v < T::zero() => T::zero()
                .checked_sub(&v)
                .map_or(Self::MISSING, SentinelInt::from_raw),
            Some(_) => *self,
            None => Self::MISSING,
        }
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self.is_missing() || other.is_missing() {
            Self::MISSING
        } else if *self <= *other {
            Self::zero()
        } else {
            *self - *other
        }
    }

    fn signum(&self) -> Self {
        self.to_option()
            .map_or(Self::MISSING, |v| SentinelInt::from_raw(Signed::signum(&v)))
    }

    fn is_positive(&self) -> bool {
        SentinelInt::is_positive(*self)
    }

    fn is_negative(&self) -> bool {
        SentinelInt::is_negative(*self)
    }
}

impl<T: IntPrimitive + Unsigned> Unsigned for SentinelInt<T> {}

//==================================================================================
// 2. Float Family
//==================================================================================

impl<T: FloatPrimitive> Zero for SentinelFloat<T> {
    fn zero() -> Self {
        SentinelFloat::from_raw(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.into_raw().is_zero()
    }
}

impl<T: FloatPrimitive> One for SentinelFloat<T> {
    fn one() -> Self {
        SentinelFloat::from_raw(T::one())
    }
}

impl<T: FloatPrimitive> Num for SentinelFloat<T> {
    type FromStrRadixErr = NumericsError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, NumericsError> {
        if s == MISSING_TOKEN {
            return Ok(Self::MISSING);
        }
        let value = <T as Num>::from_str_radix(s, radix)
            .map_err(|_| NumericsError::Parse(s.to_string()))?;
        SentinelFloat::new(value)
    }
}

impl<T: FloatPrimitive> Bounded for SentinelFloat<T> {
    fn min_value() -> Self {
        SentinelFloat::from_raw(<T as Float>::min_value())
    }

    fn max_value() -> Self {
        SentinelFloat::from_raw(<T as Float>::max_value())
    }
}

impl<T: FloatPrimitive> ToPrimitive for SentinelFloat<T> {
    fn to_i64(&self) -> Option<i64> {
        self.to_option().and_then(|v| v.to_i64())
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_option().and_then(|v| v.to_u64())
    }

    /// Missing converts to NaN.
    fn to_f64(&self) -> Option<f64> {
        self.into_raw().to_f64()
    }

    fn to_f32(&self) -> Option<f32> {
        self.into_raw().to_f32()
    }
}

impl<T: FloatPrimitive> NumCast for SentinelFloat<T> {
    fn from<N: ToPrimitive>(n: N) -> Option<Self> {
        <T as NumCast>::from(n).map(SentinelFloat::from_raw)
    }
}

impl<T: FloatPrimitive> Signed for SentinelFloat<T> {
    fn abs(&self) -> Self {
        SentinelFloat::from_raw(self.into_raw().abs())
    }

    fn abs_sub(&self, other: &Self) -> Self {
        #[allow(deprecated)]
        SentinelFloat::from_raw(Float::abs_sub(self.into_raw(), other.into_raw()))
    }

    fn signum(&self) -> Self {
        SentinelFloat::from_raw(Float::signum(self.into_raw()))
    }

    fn is_positive(&self) -> bool {
        self.has_value() && Float::is_sign_positive(self.into_raw())
    }

    fn is_negative(&self) -> bool {
        self.has_value() && Float::is_sign_negative(self.into_raw())
    }
}

macro_rules! delegate_float_unary {
    ($($method:ident),+ $(,)?) => {
        $(
            #[inline]
            fn $method(self) -> Self {
                SentinelFloat::from_raw(Float::$method(self.into_raw()))
            }
        )+
    };
}

macro_rules! delegate_float_predicate {
    ($($method:ident),+ $(,)?) => {
        $(
            #[inline]
            fn $method(self) -> bool {
                Float::$method(self.into_raw())
            }
        )+
    };
}

macro_rules! delegate_float_binary {
    ($($method:ident),+ $(,)?) => {
        $(
            #[inline]
            fn $method(self, other: Self) -> Self {
                SentinelFloat::from_raw(Float::$method(self.into_raw(), other.into_raw()))
            }
        )+
    };
}

/// Delegates to the primitive. NaN already propagates through IEEE-754, so the
/// only overrides are `max`/`min`, which for primitives skip over NaN.
impl<T: FloatPrimitive> Float for SentinelFloat<T> {
    fn nan() -> Self {
        Self::MISSING
    }

    fn infinity() -> Self {
        SentinelFloat::from_raw(T::infinity())
    }

    fn neg_infinity() -> Self {
        SentinelFloat::from_raw(T::neg_infinity())
    }

    fn neg_zero() -> Self {
        SentinelFloat::from_raw(T::neg_zero())
    }

    fn min_value() -> Self {
        SentinelFloat::from_raw(<T as Float>::min_value())
    }

    fn min_positive_value() -> Self {
        SentinelFloat::from_raw(T::min_positive_value())
    }

    fn max_value() -> Self {
        SentinelFloat::from_raw(<T as Float>::max_value())
    }

    fn epsilon() -> Self {
        SentinelFloat::from_raw(T::epsilon())
    }

    delegate_float_predicate!(
        is_nan,
        is_infinite,
        is_finite,
        is_normal,
        is_sign_positive,
        is_sign_negative,
    );

    fn classify(self) -> FpCategory {
        Float::classify(self.into_raw())
    }

    delegate_float_unary!(
        floor, ceil, round, trunc, fract, abs, signum, recip, sqrt, exp, exp2, ln, log2,
        log10, cbrt, sin, cos, tan, asin, acos, atan, exp_m1, ln_1p, sinh, cosh, tanh, asinh,
        acosh, atanh, to_degrees, to_radians,
    );

    delegate_float_binary!(powf, log, hypot, atan2);

    #[allow(deprecated)]
    fn abs_sub(self, other: Self) -> Self {
        SentinelFloat::from_raw(Float::abs_sub(self.into_raw(), other.into_raw()))
    }

    fn mul_add(self, a: Self, b: Self) -> Self {
        SentinelFloat::from_raw(Float::mul_add(self.into_raw(), a.into_raw(), b.into_raw()))
    }

    fn powi(self, n: i32) -> Self {
        SentinelFloat::from_raw(Float::powi(self.into_raw(), n))
    }

    fn sin_cos(self) -> (Self, Self) {
        let (s, c) = Float::sin_cos(self.into_raw());
        (SentinelFloat::from_raw(s), SentinelFloat::from_raw(c))
    }

    fn integer_decode(self) -> (u64, i16, i8) {
        Float::integer_decode(self.into_raw())
    }

    /// Missing propagates instead of being skipped.
    fn max(self, other: Self) -> Self {
        if self.is_missing() || other.is_missing() {
            Self::MISSING
        } else {
            SentinelFloat::from_raw(Float::max(self.into_raw(), other.into_raw()))
        }
    }

    /// Missing propagates instead of being skipped.
    fn min(self, other: Self) -> Self {
        if self.is_missing() || other.is_missing() {
            Self::MISSING
        } else {
            SentinelFloat::from_raw(Float::min(self.into_raw(), other.into_raw()))
        }
    }
}

//==================================================================================
// 3. Value-Keyed Integers
//==================================================================================

macro_rules! delegate_keyed_binary_op {
    ($($Op:ident, $op:ident);+ $(;)?) => {
        $(
            impl<T: IntPrimitive> $Op for ByValue<SentinelInt<T>> {
                type Output = Self;

                #[inline]
                fn $op(self, rhs: Self) -> Self {
                    ByValue($Op::$op(self.0, rhs.0))
                }
            }
        )+
    };
}

delegate_keyed_binary_op!(
    Add, add;
    Sub, sub;
    Mul, mul;
    Div, div;
    Rem, rem;
    BitAnd, bitand;
    BitOr, bitor;
    BitXor, bitxor;
);

impl<T: IntPrimitive> Not for ByValue<SentinelInt<T>> {
    type Output = Self;

    fn not(self) -> Self {
        ByValue(!self.0)
    }
}

impl<T: IntPrimitive> Shl<usize> for ByValue<SentinelInt<T>> {
    type Output = Self;

    fn shl(self, n: usize) -> Self {
        ByValue(self.0 << n)
    }
}

impl<T: IntPrimitive> Shr<usize> for ByValue<SentinelInt<T>> {
    type Output = Self;

    fn shr(self, n: usize) -> Self {
        ByValue(self.0 >> n)
    }
}

impl<T: IntPrimitive> Zero for ByValue<SentinelInt<T>> {
    fn zero() -> Self {
        ByValue(SentinelInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<T: IntPrimitive> One for ByValue<SentinelInt<T>> {
    fn one() -> Self {
        ByValue(SentinelInt::one())
    }
}

impl<T: IntPrimitive> Num for ByValue<SentinelInt<T>> {
    type FromStrRadixErr = NumericsError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, NumericsError> {
        <SentinelInt<T> as Num>::from_str_radix(s, radix).map(ByValue)
    }
}

impl<T: IntPrimitive> Bounded for ByValue<SentinelInt<T>> {
    fn min_value() -> Self {
        ByValue(<SentinelInt<T> as Bounded>::min_value())
    }

    fn max_value() -> Self {
        ByValue(<SentinelInt<T> as Bounded>::max_value())
    }
}

impl<T: IntPrimitive> ToPrimitive for ByValue<SentinelInt<T>> {
    fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }
}

impl<T: IntPrimitive> NumCast for ByValue<SentinelInt<T>> {
    fn from<N: ToPrimitive>(n: N) -> Option<Self> {
        <SentinelInt<T> as NumCast>::from(n).map(ByValue)
    }
}

macro_rules! delegate_keyed_checked_op {
    ($($Trait:ident, $method:ident);+ $(;)?) => {
        $(
            impl<T: IntPrimitive> $Trait for ByValue<SentinelInt<T>> {
                fn $method(&self, v: &Self) -> Option<Self> {
                    $Trait::$method(&self.0, &v.0).map(ByValue)
                }
            }
        )+
    };
}

delegate_keyed_checked_op!(
    CheckedAdd, checked_add;
    CheckedSub, checked_sub;
    CheckedMul, checked_mul;
    CheckedDiv, checked_div;
);

impl<T: IntPrimitive> Saturating for ByValue<SentinelInt<T>> {
    fn saturating_add(self, v: Self) -> Self {
        ByValue(Saturating::saturating_add(self.0, v.0))
    }

    fn saturating_sub(self, v: Self) -> Self {
        ByValue(Saturating::saturating_sub(self.0, v.0))
    }
}

fn keyed_shift<T: IntPrimitive>(
    value: SentinelInt<T>,
    n: u32,
    op: impl FnOnce(T, u32) -> T,
) -> ByValue<SentinelInt<T>> {
    match value.to_option() {
        Some(v) if n < bit_width::<T>() => ByValue(SentinelInt::from_raw(op(v, n))),
        _ => ByValue(SentinelInt::MISSING),
    }
}

/// Bit queries read the raw representation, so a missing value reports the
/// bits of its sentinel. Every value-producing method stays lifted.
impl<T: IntPrimitive> PrimInt for ByValue<SentinelInt<T>> {
    fn count_ones(self) -> u32 {
        PrimInt::count_ones(self.0.into_raw())
    }

    fn count_zeros(self) -> u32 {
        PrimInt::count_zeros(self.0.into_raw())
    }

    fn leading_zeros(self) -> u32 {
        PrimInt::leading_zeros(self.0.into_raw())
    }

    fn trailing_zeros(self) -> u32 {
        PrimInt::trailing_zeros(self.0.into_raw())
    }

    fn rotate_left(self, n: u32) -> Self {
        ByValue(self.0.rotate_left(n))
    }

    fn rotate_right(self, n: u32) -> Self {
        ByValue(self.0.rotate_right(n))
    }

    fn signed_shl(self, n: u32) -> Self {
        keyed_shift(self.0, n, PrimInt::signed_shl)
    }

    fn signed_shr(self, n: u32) -> Self {
        keyed_shift(self.0, n, PrimInt::signed_shr)
    }

    fn unsigned_shl(self, n: u32) -> Self {
        keyed_shift(self.0, n, PrimInt::unsigned_shl)
    }

    fn unsigned_shr(self, n: u32) -> Self {
        keyed_shift(self.0, n, PrimInt::unsigned_shr)
    }

    fn swap_bytes(self) -> Self {
        ByValue(self.0.swap_bytes())
    }

    fn reverse_bits(self) -> Self {
        ByValue(self.0.reverse_bits())
    }

    fn from_be(x: Self) -> Self {
        ByValue(SentinelInt::from_be(x.0))
    }

    fn from_le(x: Self) -> Self {
        ByValue(SentinelInt::from_le(x.0))
    }

    fn to_be(self) -> Self {
        ByValue(self.0.to_be())
    }

    fn to_le(self) -> Self {
        ByValue(self.0.to_le())
    }

    fn pow(self, exp: u32) -> Self {
        ByValue(self.0.pow(exp))
    }
}
