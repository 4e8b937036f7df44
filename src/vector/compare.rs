//! Elementwise three-valued comparisons and missing masks.
//!
//! These work for every `NaValue` wrapper, `FlagNullable` included. A slot is
//! `Trilean::Unknown` whenever either operand is missing.

use crate::error::NumericsError;
use crate::traits::{NaValue, TernaryEq, TernaryOrd};
use crate::types::Trilean;
use crate::utils::ensure_same_len;

fn compare_into<W>(
    x: &[W],
    y: &[W],
    dst: &mut [Trilean],
    op: impl Fn(&W, &W) -> Trilean,
) -> Result<(), NumericsError> {
    ensure_same_len(x.len(), y.len())?;
    ensure_same_len(x.len(), dst.len())?;
    for ((out, a), b) in dst.iter_mut().zip(x).zip(y) {
        *out = op(a, b);
    }
    Ok(())
}

fn compare_scalar_into<W>(
    x: &[W],
    scalar: &W,
    dst: &mut [Trilean],
    op: impl Fn(&W, &W) -> Trilean,
) -> Result<(), NumericsError> {
    ensure_same_len(x.len(), dst.len())?;
    for (out, a) in dst.iter_mut().zip(x) {
        *out = op(a, scalar);
    }
    Ok(())
}

macro_rules! impl_comparison {
    ($bound:ident, $name:ident, $scalar_name:ident, $method:ident) => {
        pub fn $name<W: $bound>(x: &[W], y: &[W], dst: &mut [Trilean]) -> Result<(), NumericsError> {
            compare_into(x, y, dst, W::$method)
        }

        pub fn $scalar_name<W: $bound>(
            x: &[W],
            scalar: &W,
            dst: &mut [Trilean],
        ) -> Result<(), NumericsError> {
            compare_scalar_into(x, scalar, dst, W::$method)
        }
    };
}

impl_comparison!(TernaryEq, equals, equals_scalar, ternary_eq);
impl_comparison!(TernaryEq, not_equals, not_equals_scalar, ternary_ne);
impl_comparison!(TernaryOrd, greater_than, greater_than_scalar, ternary_gt);
impl_comparison!(TernaryOrd, greater_than_or_equal, greater_than_or_equal_scalar, ternary_ge);
impl_comparison!(TernaryOrd, less_than, less_than_scalar, ternary_lt);
impl_comparison!(TernaryOrd, less_than_or_equal, less_than_or_equal_scalar, ternary_le);

/// `true` at every missing slot.
pub fn is_missing<W: NaValue>(x: &[W]) -> Vec<bool> {
    x.iter().map(NaValue::is_missing).collect()
}

pub fn is_missing_into<W: NaValue>(x: &[W], dst: &mut [bool]) -> Result<(), NumericsError> {
    ensure_same_len(x.len(), dst.len())?;
    for (out, v) in dst.iter_mut().zip(x) {
        *out = v.is_missing();
    }
    Ok(())
}

pub fn count_missing<W: NaValue>(x: &[W]) -> usize {
    x.iter().filter(|v| v.is_missing()).count()
}

/// Whole-sequence equality. With `missing_equal`, two missing slots match
/// (value-equality); without it, any missing slot makes the sequences unequal.
/// Sequences of different length are never equal.
pub fn sequence_equal<W: TernaryEq>(x: &[W], y: &[W], missing_equal: bool) -> bool {
    x.len() == y.len()
        && x.iter().zip(y).all(|(a, b)| {
            if missing_equal {
                a.equals(b)
            } else {
                a.eq_and_neither_missing(b)
            }
        })
}
