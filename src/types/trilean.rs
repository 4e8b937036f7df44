//! Three-valued (Kleene) logic.
//!
//! `Trilean` is what every ternary comparison returns: `True`, `False`, or
//! `Unknown` when at least one operand was missing.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NumericsError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Trilean {
    #[default]
    Unknown = 0,
    True = 1,
    False = 2,
}

impl Trilean {
    #[inline]
    pub const fn is_true(self) -> bool {
        matches!(self, Trilean::True)
    }

    #[inline]
    pub const fn is_false(self) -> bool {
        matches!(self, Trilean::False)
    }

    #[inline]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Trilean::Unknown)
    }

    pub const fn to_option(self) -> Option<bool> {
        match self {
            Trilean::True => Some(true),
            Trilean::False => Some(false),
            Trilean::Unknown => None,
        }
    }

    /// Fails on `Unknown` rather than guessing.
    pub fn to_bool(self) -> Result<bool, NumericsError> {
        self.to_option().ok_or(NumericsError::MissingValue)
    }

    /// `1`, `0`, `-1` map to `True`, `False`, `Unknown`.
    pub fn from_signed(value: i64) -> Result<Self, NumericsError> {
        match value {
            1 => Ok(Trilean::True),
            0 => Ok(Trilean::False),
            -1 => Ok(Trilean::Unknown),
            v => Err(NumericsError::Conversion(format!(
                "{} has no Trilean counterpart",
                v
            ))),
        }
    }

    pub const fn to_signed(self) -> i64 {
        match self {
            Trilean::True => 1,
            Trilean::False => 0,
            Trilean::Unknown => -1,
        }
    }
}

impl From<bool> for Trilean {
    #[inline]
    fn from(value: bool) -> Self {
        if value {
            Trilean::True
        } else {
            Trilean::False
        }
    }
}

impl From<Option<bool>> for Trilean {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Trilean::Unknown, Trilean::from)
    }
}

impl From<Trilean> for Option<bool> {
    fn from(value: Trilean) -> Self {
        value.to_option()
    }
}

//==================================================================================
// Kleene Operators
//==================================================================================

impl Not for Trilean {
    type Output = Trilean;

    fn not(self) -> Trilean {
        match self {
            Trilean::True => Trilean::False,
            Trilean::False => Trilean::True,
            Trilean::Unknown => Trilean::Unknown,
        }
    }
}

impl BitAnd for Trilean {
    type Output = Trilean;

    fn bitand(self, rhs: Trilean) -> Trilean {
        match (self, rhs) {
            (Trilean::False, _) | (_, Trilean::False) => Trilean::False,
            (Trilean::True, Trilean::True) => Trilean::True,
            _ => Trilean::Unknown,
        }
    }
}

impl BitOr for Trilean {
    type Output = Trilean;

    fn bitor(self, rhs: Trilean) -> Trilean {
        match (self, rhs) {
            (Trilean::True, _) | (_, Trilean::True) => Trilean::True,
            (Trilean::False, Trilean::False) => Trilean::False,
            _ => Trilean::Unknown,
        }
    }
}

impl BitXor for Trilean {
    type Output = Trilean;

    fn bitxor(self, rhs: Trilean) -> Trilean {
        match (self.to_option(), rhs.to_option()) {
            (Some(a), Some(b)) => Trilean::from(a != b),
            _ => Trilean::Unknown,
        }
    }
}

//==================================================================================
// Text & Serde
//==================================================================================

impl fmt::Display for Trilean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trilean::True => "True",
            Trilean::False => "False",
            Trilean::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

impl FromStr for Trilean {
    type Err = NumericsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "True" | "true" => Ok(Trilean::True),
            "False" | "false" => Ok(Trilean::False),
            "Unknown" | "NA" => Ok(Trilean::Unknown),
            other => Err(NumericsError::Parse(other.to_string())),
        }
    }
}

/// Serialized as an optional boolean: `null` is `Unknown`.
impl Serialize for Trilean {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_option().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Trilean {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(Trilean::from)
    }
}

#[cfg(test)]
mod tests {
    use super::Trilean::{False, True, Unknown};
    use super::*;

    #[test]
    fn test_kleene_and_or_tables() {
        assert_eq!(True & Unknown, Unknown);
        assert_eq!(False & Unknown, False);
        assert_eq!(True & True, True);
        assert_eq!(True | Unknown, True);
        assert_eq!(False | Unknown, Unknown);
        assert_eq!(False | False, False);
    }

    #[test]
    fn test_not_and_xor_keep_unknown() {
        assert_eq!(!Unknown, Unknown);
        assert_eq!(!True, False);
        assert_eq!(True ^ False, True);
        assert_eq!(True ^ True, False);
        assert_eq!(Unknown ^ True, Unknown);
    }

    #[test]
    fn test_to_bool_rejects_unknown() {
        assert!(True.to_bool().unwrap());
        assert!(matches!(
            Unknown.to_bool(),
            Err(NumericsError::MissingValue)
        ));
    }

    #[test]
    fn test_signed_encoding() {
        for t in [True, False, Unknown] {
            assert_eq!(Trilean::from_signed(t.to_signed()).unwrap(), t);
        }
        assert!(Trilean::from_signed(2).is_err());
    }

    #[test]
    fn test_text_and_json_forms() {
        assert_eq!(Unknown.to_string(), "Unknown");
        assert_eq!("False".parse::<Trilean>().unwrap(), False);
        assert!("maybe".parse::<Trilean>().is_err());

        let json = serde_json::to_string(&vec![True, Unknown]).unwrap();
        assert_eq!(json, "[true,null]");
        let back: Vec<Trilean> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![True, Unknown]);
    }
}
