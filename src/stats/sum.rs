//! Sums and means over plain primitive slices and over sentinel wrapper slices.
//!
//! Plain slices are missing-ignorant: a float NaN propagates through IEEE
//! arithmetic and integer sums wrap like the batch kernels. Wrapper slices
//! honour a `ReductionConfig`: under `MissingPolicy::Propagate` the first
//! missing element short-circuits to `MISSING`, under `Skip` missing elements
//! are dropped.

use num_traits::{CheckedAdd, Float, NumCast};

use crate::config::{MissingPolicy, ReductionConfig, SummationCompensation};
use crate::error::NumericsError;
use crate::traits::{FloatPrimitive, IntPrimitive, NaPrimitive, SentinelWrapper};
use crate::types::SentinelFloat;

//==================================================================================
// 1. Private Core Logic
//==================================================================================

/// Kahan–Babuška–Neumaier summation. A NaN anywhere returns NaN at once.
///
/// Once the running sum is infinite the compensation is frozen, so overflow
/// gives the same infinity a naive sum would.
fn kbn_sum<F: FloatPrimitive>(values: impl IntoIterator<Item = F>) -> F {
    let mut sum = F::zero();
    let mut compensation = F::zero();
    for v in values {
        if v.is_nan() {
            return F::nan();
        }
        let t = sum + v;
        if !t.is_finite() {
            sum = t;
            continue;
        }
        if Float::abs(sum) >= Float::abs(v) {
            compensation = compensation + ((sum - t) + v);
        } else {
            compensation = compensation + ((v - t) + sum);
        }
        sum = t;
    }
    if sum.is_finite() {
        sum + compensation
    } else {
        sum
    }
}

fn ensure_implemented(compensation: SummationCompensation) -> Result<(), NumericsError> {
    if compensation.is_implemented() {
        Ok(())
    } else {
        log::debug!("rejecting reserved compensation mode {:?}", compensation);
        Err(NumericsError::Unsupported(format!(
            "Summation compensation {:?} is reserved and not implemented",
            compensation
        )))
    }
}

/// A primitive that knows how to accumulate itself.
///
/// Integers wrap and ignore the compensation mode; floats honour it. Callers
/// reject reserved modes before accumulating.
pub trait Summation: NaPrimitive {
    fn accumulate<I: IntoIterator<Item = Self>>(values: I, compensation: SummationCompensation) -> Self;
}

macro_rules! impl_int_summation {
    ($($t:ty),+) => {
        $(
            impl Summation for $t {
                #[inline]
                fn accumulate<I: IntoIterator<Item = Self>>(values: I, _: SummationCompensation) -> Self {
                    values.into_iter().fold(0, <$t>::wrapping_add)
                }
            }
        )+
    };
}

macro_rules! impl_float_summation {
    ($($t:ty),+) => {
        $(
            impl Summation for $t {
                #[inline]
                fn accumulate<I: IntoIterator<Item = Self>>(values: I, compensation: SummationCompensation) -> Self {
                    match compensation {
                        SummationCompensation::KahanBabushkaNeumaier => kbn_sum(values),
                        _ => values.into_iter().fold(0.0, |acc, v| acc + v),
                    }
                }
            }
        )+
    };
}

impl_int_summation!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_float_summation!(f32, f64);

/// Sums a non-empty slice; a single element is returned unchanged.
#[inline]
fn sum_slice<T: Summation>(values: &[T], compensation: SummationCompensation) -> T {
    match values {
        [] => T::zero(),
        [only] => *only,
        _ => T::accumulate(values.iter().copied(), compensation),
    }
}

/// The present raw values of `values`, or `None` when the policy turns the
/// whole reduction missing. `min_count` applies under `Skip` only.
pub(crate) fn present_values<W: SentinelWrapper>(
    values: &[W],
    config: &ReductionConfig,
) -> Option<Vec<W::Raw>> {
    match config.missing {
        MissingPolicy::Propagate => {
            let raw = W::as_raw_slice(values);
            if raw.iter().any(|v| v.is_sentinel()) {
                None
            } else {
                Some(raw.to_vec())
            }
        }
        MissingPolicy::Skip => {
            let present: Vec<W::Raw> = W::as_raw_slice(values)
                .iter()
                .copied()
                .filter(|v| !v.is_sentinel())
                .collect();
            (present.len() >= config.min_count).then_some(present)
        }
    }
}

//==================================================================================
// 2. Public API: plain slices
//==================================================================================

/// Sums `values` with plain accumulation. The sum of nothing is zero.
pub fn sum<T: Summation>(values: &[T]) -> T {
    sum_slice(values, SummationCompensation::None)
}

/// Sums `values` with the requested algorithm.
///
/// # Errors
/// `Unsupported` for the reserved modes `KahanBabushka` and `Pairwise`.
pub fn sum_compensated<T: Summation>(
    values: &[T],
    compensation: SummationCompensation,
) -> Result<T, NumericsError> {
    ensure_implemented(compensation)?;
    Ok(sum_slice(values, compensation))
}

/// Sums into a (typically wider) integer type `R`, failing instead of wrapping.
///
/// # Errors
/// `Conversion` when an element does not fit `R` (a float NaN included),
/// `Overflow` when the running total leaves `R`.
pub fn sum_checked<T: NaPrimitive, R: IntPrimitive>(values: &[T]) -> Result<R, NumericsError> {
    values.iter().try_fold(R::zero(), |acc, &v| {
        let v = <R as NumCast>::from(v).ok_or_else(|| {
            NumericsError::Conversion(format!(
                "{} cannot be represented as {}",
                v,
                std::any::type_name::<R>()
            ))
        })?;
        CheckedAdd::checked_add(&acc, &v).ok_or(NumericsError::Overflow)
    })
}

/// Arithmetic mean as `f64`. Integer inputs are widened before summing.
///
/// # Errors
/// `EmptySequence` for an empty slice; `Unsupported` for a reserved mode.
pub fn mean<T: NaPrimitive>(values: &[T], compensation: SummationCompensation) -> Result<f64, NumericsError> {
    ensure_implemented(compensation)?;
    if values.is_empty() {
        return Err(NumericsError::EmptySequence);
    }
    let widened = values.iter().map(|v| v.to_f64().unwrap_or(f64::NAN));
    Ok(f64::accumulate(widened, compensation) / values.len() as f64)
}

//==================================================================================
// 3. Public API: wrapper slices
//==================================================================================

/// Sums a wrapper slice. The first missing element short-circuits to `MISSING`;
/// only a truly empty slice sums to zero.
pub fn sum_missing<W>(values: &[W]) -> W
where
    W: SentinelWrapper,
    W::Raw: Summation,
{
    let raw = W::as_raw_slice(values);
    if let Some(position) = raw.iter().position(|v| v.is_sentinel()) {
        log::trace!("sum short-circuited on missing element at {}", position);
        return W::MISSING;
    }
    W::from_raw(sum_slice(raw, SummationCompensation::None))
}

/// Sums a wrapper slice under `config`.
pub fn sum_with_config<W>(values: &[W], config: &ReductionConfig) -> Result<W, NumericsError>
where
    W: SentinelWrapper,
    W::Raw: Summation,
{
    sum_with_count(values, config).map(|(total, _)| total)
}

/// Like `sum_with_config`, also returning how many elements contributed.
/// The count is zero when the result is missing.
pub fn sum_with_count<W>(values: &[W], config: &ReductionConfig) -> Result<(W, usize), NumericsError>
where
    W: SentinelWrapper,
    W::Raw: Summation,
{
    config.validate()?;
    Ok(match present_values(values, config) {
        None => (W::MISSING, 0),
        Some(present) => (
            W::from_raw(sum_slice(&present, config.compensation)),
            present.len(),
        ),
    })
}

/// Arithmetic mean of a wrapper slice under `config`.
///
/// # Errors
/// `EmptySequence` for an empty slice. A non-empty slice with no usable values
/// yields `Ok(MISSING)`.
pub fn mean_missing<W>(values: &[W], config: &ReductionConfig) -> Result<SentinelFloat<f64>, NumericsError>
where
    W: SentinelWrapper,
{
    config.validate()?;
    if values.is_empty() {
        return Err(NumericsError::EmptySequence);
    }
    match present_values(values, config) {
        Some(present) if !present.is_empty() => {
            let m = mean(&present, config.compensation)?;
            Ok(SentinelFloat::from_raw(m))
        }
        _ => Ok(SentinelFloat::MISSING),
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentinelInt;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_float_scenario() {
        assert!(sum(&[1.0f64, f64::NAN, 3.0]).is_nan());
        assert_eq!(sum::<f64>(&[]), 0.0);
        assert_eq!(sum(&[5.0f64]), 5.0);
        assert_eq!(sum(&[-0.0f64]).to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn test_sentinel_anywhere_makes_the_sum_missing() {
        let na = SentinelInt::<i32>::MISSING;
        let one = SentinelInt::new(1).unwrap();
        for values in [[na, one, one], [one, na, one], [one, one, na]] {
            assert!(sum_missing(&values).is_missing());
        }
        assert_eq!(sum_missing::<SentinelInt<i32>>(&[]).into_raw(), 0);
        assert_eq!(sum_missing(&[one]).into_raw(), 1);
        assert!(sum_missing(&[SentinelFloat::<f32>::MISSING]).is_missing());
    }

    #[test]
    fn test_kbn_recovers_what_naive_summation_loses() {
        let values = [1.0f64, 1e100, 1.0, -1e100];
        assert_eq!(sum(&values), 0.0);
        assert_eq!(
            sum_compensated(&values, SummationCompensation::KahanBabushkaNeumaier).unwrap(),
            2.0
        );
        assert!(sum_compensated(
            &[1.0f64, f64::NAN],
            SummationCompensation::KahanBabushkaNeumaier
        )
        .unwrap()
        .is_nan());
    }

    #[test]
    fn test_kbn_overflow_matches_naive_infinity() {
        let kbn = SummationCompensation::KahanBabushkaNeumaier;
        assert_eq!(sum(&[1e308f64, 1e308]), f64::INFINITY);
        assert_eq!(sum_compensated(&[1e308f64, 1e308], kbn).unwrap(), f64::INFINITY);
        assert_eq!(
            sum_compensated(&[-1e308f64, -1e308, 5.0], kbn).unwrap(),
            f64::NEG_INFINITY
        );
        assert_eq!(sum_compensated(&[3.0e38f32, 3.0e38], kbn).unwrap(), f32::INFINITY);
        assert_eq!(mean(&[1e308f64, 1e308], kbn).unwrap(), f64::INFINITY);

        let config = ReductionConfig {
            compensation: kbn,
            ..ReductionConfig::default()
        };
        let wrapped = [SentinelFloat::from_raw(1e308f64), SentinelFloat::from_raw(1e308)];
        let total = sum_with_config(&wrapped, &config).unwrap();
        assert!(!total.is_missing());
        assert_eq!(total.into_raw(), f64::INFINITY);
    }

    #[test]
    fn test_kbn_is_closer_to_exact_reference() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut values = Vec::new();
        let mut exact: i64 = 0;
        for _ in 0..1_000 {
            let big = 2f64.powi(55) * rng.random_range(1..4i32) as f64;
            values.push(big);
            values.push(-big);
            let small: i64 = rng.random_range(-100..100);
            exact += small;
            values.push(small as f64);
        }
        values.shuffle(&mut rng);

        let naive = sum(&values);
        let kbn = sum_compensated(&values, SummationCompensation::KahanBabushkaNeumaier).unwrap();
        let naive_err = (naive - exact as f64).abs();
        let kbn_err = (kbn - exact as f64).abs();
        assert!(kbn_err <= naive_err);
        assert!(kbn_err < 1e-6, "kbn error {}", kbn_err);
    }

    #[test]
    fn test_reserved_modes_are_unsupported() {
        for mode in [SummationCompensation::KahanBabushka, SummationCompensation::Pairwise] {
            assert!(matches!(
                sum_compensated(&[1.0f32], mode),
                Err(NumericsError::Unsupported(_))
            ));
            assert!(mean(&[1.0f32], mode).is_err());
        }
    }

    #[test]
    fn test_sum_checked_widens_and_detects_overflow() {
        let total: i64 = sum_checked(&[i32::MAX - 1, i32::MAX - 1]).unwrap();
        assert_eq!(total, 2 * (i32::MAX as i64 - 1));
        assert!(matches!(
            sum_checked::<u8, u8>(&[200, 100]),
            Err(NumericsError::Overflow)
        ));
        assert!(matches!(
            sum_checked::<i64, u8>(&[-1]),
            Err(NumericsError::Conversion(_))
        ));
    }

    #[test]
    fn test_integer_sum_wraps_like_the_kernels() {
        assert_eq!(sum(&[250u8, 10]), 4);
    }

    #[test]
    fn test_config_policies() {
        let values = [
            SentinelFloat::new(1.0f64).unwrap(),
            SentinelFloat::MISSING,
            SentinelFloat::new(2.0).unwrap(),
        ];
        let propagate = ReductionConfig::default();
        assert!(sum_with_config(&values, &propagate).unwrap().is_missing());

        let skip = ReductionConfig::default().with_missing(MissingPolicy::Skip);
        let (total, count) = sum_with_count(&values, &skip).unwrap();
        assert_eq!(total.into_raw(), 3.0);
        assert_eq!(count, 2);

        let strict = ReductionConfig {
            min_count: 3,
            ..skip.clone()
        };
        assert!(sum_with_config(&values, &strict).unwrap().is_missing());

        let reserved = skip.with_compensation(SummationCompensation::Pairwise);
        assert!(sum_with_config(&values, &reserved).is_err());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1i32, 2, 3, 4], SummationCompensation::None).unwrap(), 2.5);
        assert!(matches!(
            mean::<f64>(&[], SummationCompensation::None),
            Err(NumericsError::EmptySequence)
        ));

        let values = [SentinelInt::new(4u16).unwrap(), SentinelInt::MISSING];
        let skip = ReductionConfig::default().with_missing(MissingPolicy::Skip);
        assert_eq!(mean_missing(&values, &skip).unwrap().into_raw(), 4.0);
        assert!(mean_missing(&values, &ReductionConfig::default())
            .unwrap()
            .is_missing());
        assert!(mean_missing(&[SentinelInt::<u16>::MISSING], &skip)
            .unwrap()
            .is_missing());
        assert!(mean_missing::<SentinelInt<u16>>(&[], &skip).is_err());
    }
}
