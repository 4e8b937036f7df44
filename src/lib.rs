//! This file is the root of the `na_numerics` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`types`, `kernels`,
//!     `vector`, `stats`, etc.) so the Rust compiler knows they exist.
//! 2.  Exposing a `prelude` with the wrappers, traits and configuration that
//!     almost every caller needs.
//!
//! Values that may be missing are stored in-band: `SentinelInt<T>` reserves
//! `T::MAX`, `SentinelFloat<T>` reserves NaN and `FlagNullable<T>` carries a
//! presence flag. Vector operations run a plain kernel over the raw buffers
//! and then patch the missing positions, so the hot loop never branches on
//! missingness.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
pub mod observability; // Make macros available throughout the crate

pub mod config;
pub mod error;
pub mod kernels;
pub mod null_handling;
pub mod pool;
pub mod stats;
pub mod traits;
pub mod types;
pub mod utils;
pub mod vector;

// Lets `log_metric!` reach the `log` macros from downstream crates.
#[doc(hidden)]
pub use log as __log;

//==================================================================================
// 2. Prelude
//==================================================================================
pub mod prelude {
    pub use crate::config::{MissingPolicy, ReductionConfig, SummationCompensation};
    pub use crate::error::NumericsError;
    pub use crate::traits::{
        FloatPrimitive, IntPrimitive, NaPrimitive, NaValue, SentinelWrapper, TernaryEq, TernaryOrd,
    };
    pub use crate::types::{
        ByValue, DataType, FlagNullable, HasDataType, NullableDate, SentinelFloat, SentinelInt,
        TotalKey, Trilean,
    };
}
