//! This module defines the missing-value-aware value types of the crate.
//!
//! It includes the two sentinel families (`SentinelInt`, `SentinelFloat`), the
//! flag-based `FlagNullable`, the three-valued `Trilean` result type, the
//! `ByValue` key adapter and the canonical `DataType` catalogue.

/// The text token for a missing value, in both directions.
pub const MISSING_TOKEN: &str = "NA";

pub mod by_value;
pub mod data_type;
pub mod flag_nullable;
pub mod sentinel_float;
pub mod sentinel_int;
pub mod trilean;

// num-traits impls for the sentinel families.
mod numeric;

// Re-export the main types for easier access.
pub use by_value::{ByValue, TotalKey};
pub use data_type::{DataType, HasDataType};
pub use flag_nullable::{FlagNullable, NullableDate};
pub use sentinel_float::SentinelFloat;
pub use sentinel_int::SentinelInt;
pub use trilean::Trilean;
