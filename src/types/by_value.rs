//! `ByValue<W>` keys a wrapper by value-equality.
//!
//! The wrappers' own `PartialEq` never matches a missing value, which makes
//! them unusable as `HashMap` keys or in `BTreeSet`s. `ByValue` switches to
//! `TernaryEq::equals` (missing equals missing) and the missing-first total order.
//! `Eq` and `Ord` are only offered for `TotalKey` wrappers.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use num_traits::Float;

use crate::traits::{FloatPrimitive, IntPrimitive, TernaryEq, TernaryOrd};
use crate::types::{FlagNullable, SentinelFloat, SentinelInt};

#[derive(Debug, Clone, Copy, Default)]
#[repr(transparent)]
pub struct ByValue<W>(pub W);

impl<W> ByValue<W> {
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: TernaryEq> PartialEq for ByValue<W> {
    fn eq(&self, other: &Self) -> bool {
        self.0.equals(&other.0)
    }
}

/// Wrappers whose present values are totally ordered, so value-equality is
/// reflexive and `cmp_missing_first` is a total order.
///
/// The sentinel families qualify because NaN is their missing value. A
/// `FlagNullable<T>` qualifies only when `T: Ord`; a present float NaN would
/// be unequal to itself.
pub trait TotalKey: TernaryOrd {}

impl<T: IntPrimitive> TotalKey for SentinelInt<T> {}
impl<T: FloatPrimitive> TotalKey for SentinelFloat<T> {}
impl<T: Ord> TotalKey for FlagNullable<T> {}

impl<W: TotalKey> Eq for ByValue<W> {}

impl<W: TotalKey> PartialOrd for ByValue<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: TotalKey> Ord for ByValue<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_missing_first(&other.0)
    }
}

// Every missing value hashes alike; present values hash their raw value.
impl<T: IntPrimitive> Hash for ByValue<SentinelInt<T>> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_option().hash(state);
    }
}

impl<T: FloatPrimitive> Hash for ByValue<SentinelFloat<T>> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0.to_option() {
            None => state.write_u8(0),
            Some(v) => {
                state.write_u8(1);
                // `0.0 == -0.0`, so both must hash alike.
                let (mantissa, exponent, sign) = if v == T::zero() {
                    (0, 0, 1)
                } else {
                    Float::integer_decode(v)
                };
                mantissa.hash(state);
                exponent.hash(state);
                sign.hash(state);
            }
        }
    }
}

impl<T: Hash> Hash for ByValue<FlagNullable<T>> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_option().hash(state);
    }
}
