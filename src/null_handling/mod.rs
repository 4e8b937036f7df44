//! This module is the public API for Arrow null interop.
//!
//! In-band markers (sentinels and flags) are translated to and from Arrow's
//! out-of-band validity bitmaps here, so the rest of the crate never deals
//! with `NullBuffer` directly.

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bitmap;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use bitmap::{
    dates_from_arrow, dates_to_arrow, from_arrow_array, null_buffer, reapply_missing,
    strip_present_values, to_arrow_array, trileans_from_arrow, trileans_to_arrow,
};

//==================================================================================
// 3. Unit Tests
//==================================================================================
#[cfg(test)]
mod bitmap_tests;
