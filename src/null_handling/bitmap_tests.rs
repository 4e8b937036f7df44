//==================================================================================
// Unit Tests for Arrow null interop
//==================================================================================

#[cfg(test)]
mod tests {
    use arrow::array::{Array, BooleanArray, Date32Array, Float64Array, Int32Array, Int8Array};
    use arrow::buffer::NullBuffer;
    use arrow::datatypes::{Float64Type, Int32Type, Int8Type};
    use chrono::NaiveDate;

    use crate::error::NumericsError;
    use crate::null_handling::*;
    use crate::types::{NullableDate, SentinelFloat, SentinelInt, Trilean};

    type NaI32 = SentinelInt<i32>;
    type NaF64 = SentinelFloat<f64>;

    fn na_i32(values: &[Option<i32>]) -> Vec<NaI32> {
        values
            .iter()
            .map(|v| NaI32::from_option(*v).unwrap())
            .collect()
    }

    #[test]
    fn test_missing_slots_become_arrow_nulls() {
        let values = na_i32(&[Some(1), None, Some(3)]);
        let array = to_arrow_array::<Int32Type, _>(&values);

        assert_eq!(array.len(), 3);
        assert_eq!(array.null_count(), 1);
        assert!(array.is_null(1));
        assert_eq!(array.value(0), 1);
        assert_eq!(array.value(2), 3);
    }

    #[test]
    fn test_arrow_nulls_become_missing() {
        let array = Int32Array::from(vec![Some(7), None, Some(-2)]);
        let values: Vec<NaI32> = from_arrow_array(&array).unwrap();

        assert_eq!(values[0].get().unwrap(), 7);
        assert!(values[1].is_missing());
        assert_eq!(values[1].into_raw(), i32::MAX);
        assert_eq!(values[2].get().unwrap(), -2);
    }

    #[test]
    fn test_non_null_sentinel_is_rejected() {
        let array = Int8Array::from(vec![Some(1), Some(i8::MAX)]);
        let result = from_arrow_array::<Int8Type, SentinelInt<i8>>(&array);
        assert!(matches!(result, Err(NumericsError::ReservedSentinel(_))));
    }

    #[test]
    fn test_non_null_nan_is_rejected() {
        let array = Float64Array::from(vec![Some(1.5), Some(f64::NAN)]);
        let result = from_arrow_array::<Float64Type, NaF64>(&array);
        assert!(matches!(result, Err(NumericsError::ReservedSentinel(_))));
    }

    #[test]
    fn test_float_missing_round_trips_through_arrow() {
        let values = vec![NaF64::new(0.25).unwrap(), NaF64::MISSING];
        let array = to_arrow_array::<Float64Type, _>(&values);
        assert!(array.is_null(1));

        let back: Vec<NaF64> = from_arrow_array(&array).unwrap();
        assert_eq!(back[0].get().unwrap(), 0.25);
        assert!(back[1].is_missing());
    }

    #[test]
    fn test_null_buffer_is_none_without_missing() {
        let values = na_i32(&[Some(1), Some(2)]);
        assert!(null_buffer(&values).is_none());

        let values = na_i32(&[Some(1), None, None]);
        let nb = null_buffer(&values).unwrap();
        assert_eq!(nb.len(), 3);
        assert_eq!(nb.null_count(), 2);
        assert!(nb.is_valid(0));
        assert!(nb.is_null(2));
    }

    #[test]
    fn test_strip_then_reapply_restores_positions() {
        let values = na_i32(&[None, Some(4), None, Some(5)]);
        let dense = strip_present_values(&values);
        assert_eq!(dense, vec![4, 5]);

        let nb = null_buffer(&values);
        let restored: Vec<NaI32> = reapply_missing(&dense, nb.as_ref(), values.len()).unwrap();
        assert_eq!(restored.len(), 4);
        assert!(restored[0].is_missing());
        assert_eq!(restored[1].get().unwrap(), 4);
        assert!(restored[2].is_missing());
        assert_eq!(restored[3].get().unwrap(), 5);
    }

    #[test]
    fn test_reapply_without_bitmap_requires_full_data() {
        let restored: Vec<NaI32> = reapply_missing(&[1, 2], None, 2).unwrap();
        assert_eq!(restored[1].get().unwrap(), 2);

        let err = reapply_missing::<NaI32>(&[1], None, 2).unwrap_err();
        assert!(matches!(
            err,
            NumericsError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_reapply_rejects_short_data() {
        let nb = NullBuffer::from(vec![true, false, true]);
        let err = reapply_missing::<NaI32>(&[1], Some(&nb), 3).unwrap_err();
        assert!(matches!(err, NumericsError::LengthMismatch { .. }));
    }

    #[test]
    fn test_trileans_map_unknown_to_null() {
        let values = vec![Trilean::True, Trilean::Unknown, Trilean::False];
        let array = trileans_to_arrow(&values);
        assert_eq!(array.null_count(), 1);
        assert!(array.value(0));
        assert!(!array.value(2));

        let back = trileans_from_arrow(&BooleanArray::from(vec![None, Some(true)]));
        assert_eq!(back, vec![Trilean::Unknown, Trilean::True]);
    }

    #[test]
    fn test_dates_use_days_since_epoch() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 11).unwrap();
        let values = vec![NullableDate::new(date), NullableDate::missing()];
        let array = dates_to_arrow(&values).unwrap();
        assert_eq!(array.value(0), 10);
        assert!(array.is_null(1));

        let back = dates_from_arrow(&Date32Array::from(vec![Some(-1), None])).unwrap();
        assert_eq!(
            back[0].as_option(),
            Some(&NaiveDate::from_ymd_opt(1969, 12, 31).unwrap())
        );
        assert!(back[1].is_missing());
    }
}
