//! This module contains the pure, stateless elementwise arithmetic kernels.
//!
//! Each operation comes in four shapes: into a destination, in place over the
//! first operand, and the two matching forms with a scalar right operand.
//! Integer kernels wrap on overflow, and integer division by zero yields the
//! sentinel instead of panicking (see `NaPrimitive::raw_div`).

use crate::error::NumericsError;
use crate::traits::NaPrimitive;
use crate::utils::ensure_same_len;

//==================================================================================
// 1. Private Core Logic (lengths already validated)
//==================================================================================

#[inline]
fn binary_core<T: NaPrimitive>(x: &[T], y: &[T], dst: &mut [T], op: impl Fn(T, T) -> T) {
    for ((out, &a), &b) in dst.iter_mut().zip(x).zip(y) {
        *out = op(a, b);
    }
}

#[inline]
fn binary_in_place_core<T: NaPrimitive>(x: &mut [T], y: &[T], op: impl Fn(T, T) -> T) {
    for (a, &b) in x.iter_mut().zip(y) {
        *a = op(*a, b);
    }
}

#[inline]
fn scalar_core<T: NaPrimitive>(x: &[T], scalar: T, dst: &mut [T], op: impl Fn(T, T) -> T) {
    for (out, &a) in dst.iter_mut().zip(x) {
        *out = op(a, scalar);
    }
}

#[inline]
fn scalar_in_place_core<T: NaPrimitive>(x: &mut [T], scalar: T, op: impl Fn(T, T) -> T) {
    for a in x.iter_mut() {
        *a = op(*a, scalar);
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

macro_rules! impl_raw_kernels {
    ($op:ident, $in_place:ident, $scalar:ident, $scalar_in_place:ident, $raw:ident) => {
        /// `dst[i] = x[i] op y[i]`. All three lengths must match.
        pub fn $op<T: NaPrimitive>(x: &[T], y: &[T], dst: &mut [T]) -> Result<(), NumericsError> {
            ensure_same_len(x.len(), y.len())?;
            ensure_same_len(x.len(), dst.len())?;
            binary_core(x, y, dst, <T as NaPrimitive>::$raw);
            Ok(())
        }

        /// `x[i] = x[i] op y[i]`.
        pub fn $in_place<T: NaPrimitive>(x: &mut [T], y: &[T]) -> Result<(), NumericsError> {
            ensure_same_len(x.len(), y.len())?;
            binary_in_place_core(x, y, <T as NaPrimitive>::$raw);
            Ok(())
        }

        /// `dst[i] = x[i] op scalar`.
        pub fn $scalar<T: NaPrimitive>(
            x: &[T],
            scalar: T,
            dst: &mut [T],
        ) -> Result<(), NumericsError> {
            ensure_same_len(x.len(), dst.len())?;
            scalar_core(x, scalar, dst, <T as NaPrimitive>::$raw);
            Ok(())
        }

        /// `x[i] = x[i] op scalar`.
        pub fn $scalar_in_place<T: NaPrimitive>(x: &mut [T], scalar: T) {
            scalar_in_place_core(x, scalar, <T as NaPrimitive>::$raw);
        }
    };
}

impl_raw_kernels!(add, add_in_place, add_scalar, add_scalar_in_place, raw_add);
impl_raw_kernels!(
    subtract,
    subtract_in_place,
    subtract_scalar,
    subtract_scalar_in_place,
    raw_sub
);
impl_raw_kernels!(
    multiply,
    multiply_in_place,
    multiply_scalar,
    multiply_scalar_in_place,
    raw_mul
);
impl_raw_kernels!(
    divide,
    divide_in_place,
    divide_scalar,
    divide_scalar_in_place,
    raw_div
);

//==================================================================================
// 3. Unit Tests
//==================================================================================
