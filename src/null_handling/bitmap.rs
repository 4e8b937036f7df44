// --- IN: src/null_handling/bitmap.rs ---

//! Conversions between in-band missing markers and Arrow validity bitmaps.
//!
//! A sentinel wrapper slice keeps "missing" inside the value buffer; Arrow
//! keeps it in a separate `NullBuffer`. Going out, every missing slot becomes a
//! null. Coming in, every null becomes `MISSING`, and a non-null value equal to
//! the sentinel is rejected because it could not be told apart from missing.

use arrow::array::{ArrowPrimitiveType, BooleanArray, Date32Array, PrimitiveArray, PrimitiveBuilder};
use arrow::buffer::NullBuffer;
use arrow::datatypes::Date32Type;
use chrono::{Duration, NaiveDate};

use crate::error::NumericsError;
use crate::traits::{NaPrimitive, NaValue, SentinelWrapper};
use crate::types::{NullableDate, Trilean};
use crate::utils::ensure_same_len;

//==================================================================================
// 1. Sentinel Wrappers <-> Arrow Primitive Arrays
//==================================================================================

/// Builds an Arrow array; missing slots become nulls.
pub fn to_arrow_array<A, W>(values: &[W]) -> PrimitiveArray<A>
where
    A: ArrowPrimitiveType,
    W: SentinelWrapper<Raw = A::Native>,
{
    let mut builder = PrimitiveBuilder::<A>::with_capacity(values.len());
    for value in values {
        if value.is_missing() {
            builder.append_null();
        } else {
            builder.append_value(value.into_raw());
        }
    }
    builder.finish()
}

/// Reads an Arrow array; nulls become `MISSING`.
///
/// # Errors
/// `ReservedSentinel` when a non-null slot holds the sentinel (for floats, a
/// non-null NaN).
pub fn from_arrow_array<A, W>(array: &PrimitiveArray<A>) -> Result<Vec<W>, NumericsError>
where
    A: ArrowPrimitiveType,
    W: SentinelWrapper<Raw = A::Native>,
{
    array
        .iter()
        .map(|slot| match slot {
            None => Ok(W::MISSING),
            Some(raw) => {
                let value = W::from_raw(raw);
                if value.is_missing() {
                    Err(NumericsError::ReservedSentinel(format!("{:?}", raw)))
                } else {
                    Ok(value)
                }
            }
        })
        .collect()
}

/// The validity bitmap of `values`, or `None` when nothing is missing.
pub fn null_buffer<W: NaValue>(values: &[W]) -> Option<NullBuffer> {
    if values.iter().all(NaValue::has_value) {
        return None;
    }
    let validity: Vec<bool> = values.iter().map(NaValue::has_value).collect();
    Some(NullBuffer::from(validity))
}

/// Extracts the present values into a new, dense `Vec`.
pub fn strip_present_values<W: SentinelWrapper>(values: &[W]) -> Vec<W::Raw> {
    W::as_raw_slice(values)
        .iter()
        .copied()
        .filter(|v| !v.is_sentinel())
        .collect()
}

/// Re-expands dense values against a validity bitmap into `num_rows` wrappers.
///
/// Without a bitmap every row must be present in `dense`.
pub fn reapply_missing<W: SentinelWrapper>(
    dense: &[W::Raw],
    nulls: Option<&NullBuffer>,
    num_rows: usize,
) -> Result<Vec<W>, NumericsError> {
    let Some(nb) = nulls else {
        ensure_same_len(num_rows, dense.len())?;
        return Ok(W::from_raw_slice(dense).to_vec());
    };
    ensure_same_len(num_rows, nb.len())?;
    ensure_same_len(nb.len() - nb.null_count(), dense.len())?;

    let mut out = Vec::with_capacity(num_rows);
    let mut dense_iter = dense.iter();
    for row in 0..num_rows {
        if nb.is_valid(row) {
            match dense_iter.next() {
                Some(&raw) => out.push(W::from_raw(raw)),
                None => {
                    return Err(NumericsError::InvalidArgument(
                        "Validity bitmap indicates more valid values than data provided".to_string(),
                    ))
                }
            }
        } else {
            out.push(W::MISSING);
        }
    }
    Ok(out)
}

//==================================================================================
// 2. Flag-Based Values <-> Arrow
//==================================================================================

pub fn trileans_to_arrow(values: &[Trilean]) -> BooleanArray {
    BooleanArray::from(values.iter().map(|t| t.to_option()).collect::<Vec<_>>())
}

pub fn trileans_from_arrow(array: &BooleanArray) -> Vec<Trilean> {
    array.iter().map(Trilean::from).collect()
}

fn unix_epoch() -> Result<NaiveDate, NumericsError> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .ok_or_else(|| NumericsError::Conversion("Unix epoch is not a valid date".to_string()))
}

/// Dates become Arrow `Date32` (days since the Unix epoch).
///
/// # Errors
/// `Conversion` for a date outside the `Date32` range.
pub fn dates_to_arrow(values: &[NullableDate]) -> Result<Date32Array, NumericsError> {
    let epoch = unix_epoch()?;
    let mut builder = PrimitiveBuilder::<Date32Type>::with_capacity(values.len());
    for value in values {
        match value.as_option() {
            None => builder.append_null(),
            Some(date) => {
                let days = i32::try_from(date.signed_duration_since(epoch).num_days())
                    .map_err(|_| NumericsError::Conversion(format!("{} is outside the Date32 range", date)))?;
                builder.append_value(days);
            }
        }
    }
    Ok(builder.finish())
}

pub fn dates_from_arrow(array: &Date32Array) -> Result<Vec<NullableDate>, NumericsError> {
    let epoch = unix_epoch()?;
    array
        .iter()
        .map(|slot| match slot {
            None => Ok(NullableDate::missing()),
            Some(days) => epoch
                .checked_add_signed(Duration::days(i64::from(days)))
                .map(NullableDate::new)
                .ok_or_else(|| {
                    NumericsError::Conversion(format!("{} days from the epoch is not a valid date", days))
                }),
        })
        .collect()
}
