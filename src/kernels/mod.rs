//! This module is the collection of raw, missing-ignorant batch kernels.
//!
//! Kernels operate on plain primitive slices and never look at the sentinel.
//! The `vector` layer reinterprets wrapper slices as raw slices, runs a kernel
//! from `arithmetic`, then restores missing positions with a pass from `patch`.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Elementwise `+ - * /` over raw primitive slices.
pub mod arithmetic;

/// Sentinel scans and the correction pass.
pub mod patch;
