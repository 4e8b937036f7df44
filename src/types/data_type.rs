//! This module defines the canonical, type-safe catalogue of element types
//! understood by this crate, with stable text labels and Arrow mappings.

use std::fmt;
use std::str::FromStr;

use arrow::datatypes::DataType as ArrowDataType;
use serde::{Deserialize, Serialize};

use crate::error::NumericsError;
use crate::types::{FlagNullable, SentinelFloat, SentinelInt, Trilean};

/// Every element type a sequence of this crate can hold.
///
/// Serialized as its label (`"int32"`, `"na_float64"`, ...).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    NaInt8,
    NaInt16,
    NaInt32,
    NaInt64,
    NaUInt8,
    NaUInt16,
    NaUInt32,
    NaUInt64,
    NaFloat32,
    NaFloat64,
    Bool,
    Trilean,
    Date,
    NullableDate,
}

const ALL: [DataType; 24] = [
    DataType::Int8,
    DataType::Int16,
    DataType::Int32,
    DataType::Int64,
    DataType::UInt8,
    DataType::UInt16,
    DataType::UInt32,
    DataType::UInt64,
    DataType::Float32,
    DataType::Float64,
    DataType::NaInt8,
    DataType::NaInt16,
    DataType::NaInt32,
    DataType::NaInt64,
    DataType::NaUInt8,
    DataType::NaUInt16,
    DataType::NaUInt32,
    DataType::NaUInt64,
    DataType::NaFloat32,
    DataType::NaFloat64,
    DataType::Bool,
    DataType::Trilean,
    DataType::Date,
    DataType::NullableDate,
];

impl DataType {
    pub const fn label(self) -> &'static str {
        match self {
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::UInt8 => "uint8",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::UInt64 => "uint64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::NaInt8 => "na_int8",
            DataType::NaInt16 => "na_int16",
            DataType::NaInt32 => "na_int32",
            DataType::NaInt64 => "na_int64",
            DataType::NaUInt8 => "na_uint8",
            DataType::NaUInt16 => "na_uint16",
            DataType::NaUInt32 => "na_uint32",
            DataType::NaUInt64 => "na_uint64",
            DataType::NaFloat32 => "na_float32",
            DataType::NaFloat64 => "na_float64",
            DataType::Bool => "bool",
            DataType::Trilean => "trilean",
            DataType::Date => "date",
            DataType::NullableDate => "nullable_date",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            DataType::Bool | DataType::Trilean | DataType::Date | DataType::NullableDate
        )
    }

    /// True for the types that can represent a missing value.
    pub fn is_missing_aware(self) -> bool {
        self.to_missing_aware() == self
    }

    /// The missing-aware counterpart of a plain type (`int32` -> `na_int32`).
    pub fn to_missing_aware(self) -> DataType {
        match self {
            DataType::Int8 => DataType::NaInt8,
            DataType::Int16 => DataType::NaInt16,
            DataType::Int32 => DataType::NaInt32,
            DataType::Int64 => DataType::NaInt64,
            DataType::UInt8 => DataType::NaUInt8,
            DataType::UInt16 => DataType::NaUInt16,
            DataType::UInt32 => DataType::NaUInt32,
            DataType::UInt64 => DataType::NaUInt64,
            DataType::Float32 => DataType::NaFloat32,
            DataType::Float64 => DataType::NaFloat64,
            DataType::Bool => DataType::Trilean,
            DataType::Date => DataType::NullableDate,
            other => other,
        }
    }

    /// Converts into an Arrow `DataType`. Missing-aware types map to the same
    /// physical type with nulls in the validity bitmap.
    pub fn to_arrow_type(self) -> ArrowDataType {
        match self {
            DataType::Int8 | DataType::NaInt8 => ArrowDataType::Int8,
            DataType::Int16 | DataType::NaInt16 => ArrowDataType::Int16,
            DataType::Int32 | DataType::NaInt32 => ArrowDataType::Int32,
            DataType::Int64 | DataType::NaInt64 => ArrowDataType::Int64,
            DataType::UInt8 | DataType::NaUInt8 => ArrowDataType::UInt8,
            DataType::UInt16 | DataType::NaUInt16 => ArrowDataType::UInt16,
            DataType::UInt32 | DataType::NaUInt32 => ArrowDataType::UInt32,
            DataType::UInt64 | DataType::NaUInt64 => ArrowDataType::UInt64,
            DataType::Float32 | DataType::NaFloat32 => ArrowDataType::Float32,
            DataType::Float64 | DataType::NaFloat64 => ArrowDataType::Float64,
            DataType::Bool | DataType::Trilean => ArrowDataType::Boolean,
            DataType::Date | DataType::NullableDate => ArrowDataType::Date32,
        }
    }

    /// Converts an Arrow `DataType`; `nullable` selects the missing-aware variant.
    pub fn from_arrow_type(arrow_type: &ArrowDataType, nullable: bool) -> Result<Self, NumericsError> {
        let plain = match arrow_type {
            ArrowDataType::Int8 => DataType::Int8,
            ArrowDataType::Int16 => DataType::Int16,
            ArrowDataType::Int32 => DataType::Int32,
            ArrowDataType::Int64 => DataType::Int64,
            ArrowDataType::UInt8 => DataType::UInt8,
            ArrowDataType::UInt16 => DataType::UInt16,
            ArrowDataType::UInt32 => DataType::UInt32,
            ArrowDataType::UInt64 => DataType::UInt64,
            ArrowDataType::Float32 => DataType::Float32,
            ArrowDataType::Float64 => DataType::Float64,
            ArrowDataType::Boolean => DataType::Bool,
            ArrowDataType::Date32 => DataType::Date,
            dt => {
                return Err(NumericsError::Unsupported(format!(
                    "Cannot convert Arrow type {:?} to DataType",
                    dt
                )))
            }
        };
        Ok(if nullable {
            plain.to_missing_aware()
        } else {
            plain
        })
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DataType {
    type Err = NumericsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .copied()
            .find(|dt| dt.label() == s)
            .ok_or_else(|| NumericsError::Unsupported(format!("Unknown data type label '{}'", s)))
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.label().to_string()
    }
}

impl TryFrom<String> for DataType {
    type Error = NumericsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

//==================================================================================
// Static Type Mapping
//==================================================================================

/// Links a Rust element type to its catalogue entry.
pub trait HasDataType {
    const DATA_TYPE: DataType;
}

macro_rules! impl_has_data_type {
    ($($t:ty => $plain:ident);+ $(;)?) => {
        $(
            impl HasDataType for $t {
                const DATA_TYPE: DataType = DataType::$plain;
            }
        )+
    };
}

impl_has_data_type!(
    i8 => Int8;
    i16 => Int16;
    i32 => Int32;
    i64 => Int64;
    u8 => UInt8;
    u16 => UInt16;
    u32 => UInt32;
    u64 => UInt64;
    f32 => Float32;
    f64 => Float64;
);

macro_rules! impl_has_data_type_for_wrappers {
    ($($wrapper:ident<$t:ty> => $na:ident);+ $(;)?) => {
        $(
            impl HasDataType for $wrapper<$t> {
                const DATA_TYPE: DataType = DataType::$na;
            }
        )+
    };
}

impl_has_data_type_for_wrappers!(
    SentinelInt<i8> => NaInt8;
    SentinelInt<i16> => NaInt16;
    SentinelInt<i32> => NaInt32;
    SentinelInt<i64> => NaInt64;
    SentinelInt<u8> => NaUInt8;
    SentinelInt<u16> => NaUInt16;
    SentinelInt<u32> => NaUInt32;
    SentinelInt<u64> => NaUInt64;
    SentinelFloat<f32> => NaFloat32;
    SentinelFloat<f64> => NaFloat64;
    FlagNullable<chrono::NaiveDate> => NullableDate;
);

impl HasDataType for bool {
    const DATA_TYPE: DataType = DataType::Bool;
}

impl HasDataType for Trilean {
    const DATA_TYPE: DataType = DataType::Trilean;
}

impl HasDataType for chrono::NaiveDate {
    const DATA_TYPE: DataType = DataType::Date;
}
