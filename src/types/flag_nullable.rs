//! `FlagNullable<T>`: a value paired with an explicit presence flag.
//!
//! Used for types with no safely reservable sentinel (text, dates). The
//! equality contract matches the sentinel families: `PartialEq` never matches
//! a missing value, `TernaryEq::equals` treats two missing values as equal, and
//! `TernaryOrd::cmp_missing_first` orders missing before every present value.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NumericsError;
use crate::traits::NaValue;
use crate::types::MISSING_TOKEN;

/// `Default` is the missing value.
#[derive(Clone, Copy, Default)]
pub struct FlagNullable<T> {
    value: T,
    has_value: bool,
}

/// A calendar date that may be missing.
pub type NullableDate = FlagNullable<chrono::NaiveDate>;

impl<T> FlagNullable<T> {
    /// Every `T` is storable; there is no reserved value.
    pub const fn new(value: T) -> Self {
        FlagNullable {
            value,
            has_value: true,
        }
    }

    pub fn has_value(&self) -> bool {
        self.has_value
    }

    pub fn is_missing(&self) -> bool {
        !self.has_value
    }

    pub fn get(&self) -> Result<&T, NumericsError> {
        self.as_option().ok_or(NumericsError::MissingValue)
    }

    pub fn as_option(&self) -> Option<&T> {
        if self.has_value {
            Some(&self.value)
        } else {
            None
        }
    }

    pub fn into_option(self) -> Option<T> {
        if self.has_value {
            Some(self.value)
        } else {
            None
        }
    }

    /// Applies `f` to a present value; missing stays missing.
    pub fn map<U: Default>(self, f: impl FnOnce(T) -> U) -> FlagNullable<U> {
        match self.into_option() {
            Some(v) => FlagNullable::new(f(v)),
            None => FlagNullable::missing(),
        }
    }
}

impl<T: Default> FlagNullable<T> {
    /// The slot holds `T::default()` and is never read.
    pub fn missing() -> Self {
        FlagNullable {
            value: T::default(),
            has_value: false,
        }
    }

    pub fn from_option(value: Option<T>) -> Self {
        value.map_or_else(Self::missing, Self::new)
    }

    fn lift(self, rhs: Self, op: impl FnOnce(T, T) -> T) -> Self {
        match (self.into_option(), rhs.into_option()) {
            (Some(a), Some(b)) => FlagNullable::new(op(a, b)),
            _ => Self::missing(),
        }
    }
}

impl<T> From<T> for FlagNullable<T> {
    fn from(value: T) -> Self {
        FlagNullable::new(value)
    }
}

impl<T> NaValue for FlagNullable<T> {
    type Value = T;

    fn value_ref(&self) -> Option<&T> {
        self.as_option()
    }
}

//==================================================================================
// Equality & Ordering
//==================================================================================

impl<T: PartialEq> PartialEq for FlagNullable<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_option(), other.as_option()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: PartialOrd> PartialOrd for FlagNullable<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.as_option(), other.as_option()) {
            (Some(a), Some(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

//==================================================================================
// Lifted Arithmetic
//==================================================================================

impl<T: Add<Output = T> + Default> Add for FlagNullable<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.lift(rhs, |a, b| a + b)
    }
}

impl<T: Sub<Output = T> + Default> Sub for FlagNullable<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.lift(rhs, |a, b| a - b)
    }
}

impl<T: Mul<Output = T> + Default> Mul for FlagNullable<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.lift(rhs, |a, b| a * b)
    }
}

/// A zero divisor yields missing, for every `T`.
impl<T: Div<Output = T> + Zero + Default> Div for FlagNullable<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        match (self.into_option(), rhs.into_option()) {
            (Some(_), Some(b)) if b.is_zero() => Self::missing(),
            (Some(a), Some(b)) => FlagNullable::new(a / b),
            _ => Self::missing(),
        }
    }
}

impl<T: Neg<Output = T> + Default> Neg for FlagNullable<T> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

//==================================================================================
// Text & Serde
//==================================================================================

impl<T: fmt::Display> fmt::Display for FlagNullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(v) => v.fmt(f),
            None => f.write_str(MISSING_TOKEN),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FlagNullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(v) => v.fmt(f),
            None => f.write_str(MISSING_TOKEN),
        }
    }
}

impl<T: FromStr + Default> FromStr for FlagNullable<T> {
    type Err = NumericsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == MISSING_TOKEN {
            return Ok(Self::missing());
        }
        s.parse::<T>()
            .map(FlagNullable::new)
            .map_err(|_| NumericsError::Parse(s.to_string()))
    }
}

impl<T: Serialize> Serialize for FlagNullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for FlagNullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(FlagNullable::from_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{TernaryEq, TernaryOrd};
    use crate::types::Trilean;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NullableDate {
        NullableDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_equality_asymmetry_on_text() {
        let na = FlagNullable::<String>::missing();
        assert!(na.equals(&na));
        assert!(na != na);
        let a = FlagNullable::new("x".to_string());
        assert!(a == a.clone());
        assert_eq!(a.ternary_eq(&na), Trilean::Unknown);
    }

    #[test]
    fn test_missing_sorts_first() {
        let mut dates = vec![
            date(2024, 3, 1),
            NullableDate::missing(),
            date(2023, 1, 9),
            NullableDate::missing(),
        ];
        dates.sort_by(|a, b| a.cmp_missing_first(b));
        assert!(dates[0].is_missing() && dates[1].is_missing());
        assert_eq!(dates[2], date(2023, 1, 9));
        assert_eq!(dates[3], date(2024, 3, 1));
        assert_eq!(dates[2].ternary_lt(&dates[3]), Trilean::True);
        assert_eq!(dates[0].ternary_lt(&dates[3]), Trilean::Unknown);
    }

    #[test]
    fn test_lifted_arithmetic() {
        let a = FlagNullable::new(6i32);
        let b = FlagNullable::new(3i32);
        let na = FlagNullable::<i32>::missing();
        assert_eq!(*(a + b).get().unwrap(), 9);
        assert_eq!(*(a / b).get().unwrap(), 2);
        assert!((a / FlagNullable::new(0)).is_missing());
        assert!((a * na).is_missing());
        assert!((-na).is_missing());
    }

    #[test]
    fn test_text_and_serde_round_trip() {
        let d: NullableDate = "2024-02-29".parse().unwrap();
        assert_eq!(d.to_string(), "2024-02-29");
        assert!("NA".parse::<NullableDate>().unwrap().is_missing());
        assert!("2024-02-30".parse::<NullableDate>().is_err());

        let json = serde_json::to_string(&vec![FlagNullable::new(1.5f64), FlagNullable::missing()])
            .unwrap();
        assert_eq!(json, "[1.5,null]");
    }
}
