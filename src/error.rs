// In: src/error.rs

//! This module defines the single, unified error type for the entire crate.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Missing values flowing through arithmetic are never errors. They are the
//! signalling mechanism for "unknown". Errors are reserved for programmer
//! mistakes (reading a missing value, reusing a sentinel) and for inputs with
//! no sensible result (the mean of nothing).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumericsError {
    // =========================================================================
    // === High-Level, Semantic Errors
    // =========================================================================
    /// Construction or parsing attempted to store the reserved sentinel value.
    #[error("Value {0} is reserved as the missing-value sentinel")]
    ReservedSentinel(String),

    /// The underlying value of a missing instance was read.
    #[error("Attempted to read the value of a missing (NA) instance")]
    MissingValue,

    #[error("Sequence length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Operation is undefined for an empty sequence")]
    EmptySequence,

    #[error("Operation requires at least {required} values, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Failed to parse '{0}' as a numeric value")]
    Parse(String),

    #[error("Numeric conversion failed: {0}")]
    Conversion(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error from the Serde JSON library, typically while loading a config.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for NumericsError {
    fn from(err: bytemuck::PodCastError) -> Self {
        NumericsError::PodCast(format!("{:?}", err))
    }
}
