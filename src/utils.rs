//! This module provides a set of shared, low-level utility functions used
//! throughout the crate.
//!
//! Its primary responsibilities include:
//! 1.  The shape check every elementwise operation runs before writing.
//! 2.  Safe, validated conversions between raw byte buffers and typed slices of
//!     primitives or sentinel wrappers. Byte order is always native.

use bytemuck::Pod;

use crate::error::NumericsError;

//==================================================================================
// 1. Shape Validation
//==================================================================================

/// Fails with `LengthMismatch` unless `actual == expected`.
#[inline]
pub fn ensure_same_len(expected: usize, actual: usize) -> Result<(), NumericsError> {
    if expected != actual {
        return Err(NumericsError::LengthMismatch { expected, actual });
    }
    Ok(())
}

//==================================================================================
// 2. Byte Buffer Conversions
//==================================================================================

/// Safely reinterprets a byte slice as a slice of `T` without copying.
///
/// # Errors
/// Returns `NumericsError::PodCast` if the length is not a multiple of
/// `size_of::<T>()` or the buffer is misaligned for `T`.
pub fn safe_bytes_to_typed_slice<T: Pod>(bytes: &[u8]) -> Result<&[T], NumericsError> {
    Ok(bytemuck::try_cast_slice(bytes)?)
}

/// Copies a typed slice into an owned byte vector.
pub fn typed_slice_to_bytes<T: Pod>(data: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}

/// Decodes a byte buffer of any alignment into an owned vector of `T`.
///
/// For sentinel wrappers, an element holding the raw sentinel decodes as missing.
pub fn bytes_to_typed_vec<T: Pod>(bytes: &[u8]) -> Result<Vec<T>, NumericsError> {
    let width = std::mem::size_of::<T>();
    if width == 0 || bytes.len() % width != 0 {
        return Err(NumericsError::PodCast(format!(
            "Byte length {} is not a multiple of element width {}",
            bytes.len(),
            width
        )));
    }
    Ok(bytes
        .chunks_exact(width)
        .map(bytemuck::pod_read_unaligned::<T>)
        .collect())
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SentinelFloat, SentinelInt};

    #[test]
    fn test_ensure_same_len() {
        assert!(ensure_same_len(3, 3).is_ok());
        let err = ensure_same_len(3, 4).unwrap_err();
        assert!(matches!(
            err,
            NumericsError::LengthMismatch {
                expected: 3,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_wrapper_bytes_round_trip_keeps_missing() {
        let values = vec![
            SentinelInt::new(7i32).unwrap(),
            SentinelInt::MISSING,
            SentinelInt::new(-2).unwrap(),
        ];
        let bytes = typed_slice_to_bytes(&values);
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[4..8], &i32::MAX.to_ne_bytes());

        let back: Vec<SentinelInt<i32>> = bytes_to_typed_vec(&bytes).unwrap();
        assert_eq!(back[0], values[0]);
        assert!(back[1].is_missing());
        assert_eq!(back[2].into_raw(), -2);
    }

    #[test]
    fn test_raw_nan_decodes_as_missing() {
        let bytes = typed_slice_to_bytes(&[1.5f64, f64::NAN]);
        let back: Vec<SentinelFloat<f64>> = bytes_to_typed_vec(&bytes).unwrap();
        assert_eq!(back[0].into_raw(), 1.5);
        assert!(back[1].is_missing());
    }

    #[test]
    fn test_bad_byte_length_is_rejected() {
        let err = bytes_to_typed_vec::<u32>(&[0u8; 5]).unwrap_err();
        assert!(matches!(err, NumericsError::PodCast(_)));
        assert!(safe_bytes_to_typed_slice::<u8>(&[1, 2, 3]).is_ok());
    }
}
