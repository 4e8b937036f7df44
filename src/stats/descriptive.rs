//! Descriptive statistics over float slices, with missing-aware wrappers.
//!
//! The plain functions take `&[F]` and let a NaN input propagate to a NaN
//! result. All internal sums use compensated summation. Order statistics sort
//! a copy held in a pooled `f64` scratch buffer.
//!
//! `reduce_missing` lifts any plain statistic to wrapper slices under a
//! `ReductionConfig`.

use num_traits::{Float, NumCast, ToPrimitive};

use crate::config::{ReductionConfig, SummationCompensation};
use crate::error::NumericsError;
use crate::pool::with_scratch_f64;
use crate::stats::sum::{present_values, Summation};
use crate::traits::{FloatPrimitive, NaPrimitive, SentinelWrapper};
use crate::types::SentinelFloat;

//==================================================================================
// 1. Private Core Logic
//==================================================================================

fn ensure_non_empty<T>(values: &[T]) -> Result<(), NumericsError> {
    if values.is_empty() {
        Err(NumericsError::EmptySequence)
    } else {
        Ok(())
    }
}

fn kbn<F: FloatPrimitive + Summation>(values: impl IntoIterator<Item = F>) -> F {
    F::accumulate(values, SummationCompensation::KahanBabushkaNeumaier)
}

fn narrow<F: FloatPrimitive>(value: f64) -> F {
    <F as NumCast>::from(value).unwrap_or_else(F::nan)
}

/// Runs `f` over a sorted `f64` copy of `values`. `None` when any value is NaN.
fn with_sorted<F, R>(values: &[F], f: impl FnOnce(&[f64]) -> R) -> Option<R>
where
    F: FloatPrimitive,
{
    with_scratch_f64(values.len(), |buf| {
        for v in values {
            let v = v.to_f64().unwrap_or(f64::NAN);
            if v.is_nan() {
                return None;
            }
            buf.push(v);
        }
        buf.sort_unstable_by(f64::total_cmp);
        Some(f(buf.as_slice()))
    })
}

/// Type-7 quantile of sorted data: linear interpolation at `h = (n - 1) p`.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

fn ensure_all_positive<F: FloatPrimitive>(values: &[F], what: &str) -> Result<(), NumericsError> {
    match values.iter().find(|&&v| v <= F::zero()) {
        Some(v) => Err(NumericsError::InvalidArgument(format!(
            "{} requires positive values, got {}",
            what, v
        ))),
        None => Ok(()),
    }
}

//==================================================================================
// 2. Public API: plain slices
//==================================================================================

/// Sample variance (`n - 1` denominator), computed in two passes.
///
/// # Errors
/// `EmptySequence` for no values, `InsufficientData` for a single value.
pub fn variance<F: FloatPrimitive + Summation>(values: &[F]) -> Result<F, NumericsError> {
    ensure_non_empty(values)?;
    if values.len() < 2 {
        return Err(NumericsError::InsufficientData {
            required: 2,
            actual: values.len(),
        });
    }
    let n = narrow::<F>(values.len() as f64);
    let mean = kbn(values.iter().copied()) / n;
    let squares = kbn(values.iter().map(|&v| (v - mean) * (v - mean)));
    Ok(squares / (n - F::one()))
}

/// Sample standard deviation.
pub fn std_dev<F: FloatPrimitive + Summation>(values: &[F]) -> Result<F, NumericsError> {
    variance(values).map(Float::sqrt)
}

/// The middle value, or the mean of the two middle values.
pub fn median<F: FloatPrimitive>(values: &[F]) -> Result<F, NumericsError> {
    quantile(values, 0.5)
}

/// Linear-interpolation quantile (`p` in `[0, 1]`).
///
/// # Errors
/// `InvalidArgument` for `p` outside `[0, 1]`, `EmptySequence` for no values.
pub fn quantile<F: FloatPrimitive>(values: &[F], p: f64) -> Result<F, NumericsError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(NumericsError::InvalidArgument(format!(
            "quantile probability must lie in [0, 1], got {}",
            p
        )));
    }
    ensure_non_empty(values)?;
    Ok(with_sorted(values, |sorted| quantile_sorted(sorted, p)).map_or_else(F::nan, narrow))
}

/// `exp(mean(ln x))`. Every value must be positive.
pub fn geometric_mean<F: FloatPrimitive + Summation>(values: &[F]) -> Result<F, NumericsError> {
    ensure_non_empty(values)?;
    ensure_all_positive(values, "geometric mean")?;
    let n = narrow::<F>(values.len() as f64);
    Ok((kbn(values.iter().map(|v| v.ln())) / n).exp())
}

/// `n / sum(1 / x)`. Every value must be positive.
pub fn harmonic_mean<F: FloatPrimitive + Summation>(values: &[F]) -> Result<F, NumericsError> {
    ensure_non_empty(values)?;
    ensure_all_positive(values, "harmonic mean")?;
    let n = narrow::<F>(values.len() as f64);
    Ok(n / kbn(values.iter().map(|v| v.recip())))
}

/// Smallest value. A float NaN anywhere yields NaN.
pub fn min<T: NaPrimitive>(values: &[T]) -> Result<T, NumericsError> {
    extreme(values, |candidate, best| candidate < best)
}

/// Largest value. A float NaN anywhere yields NaN.
pub fn max<T: NaPrimitive>(values: &[T]) -> Result<T, NumericsError> {
    extreme(values, |candidate, best| candidate > best)
}

fn extreme<T: NaPrimitive>(values: &[T], better: impl Fn(T, T) -> bool) -> Result<T, NumericsError> {
    let (&first, rest) = values.split_first().ok_or(NumericsError::EmptySequence)?;
    // Only NaN is unequal to itself.
    #[allow(clippy::eq_op)]
    let is_nan = |v: T| v != v;
    if is_nan(first) {
        return Ok(first);
    }
    let mut best = first;
    for &v in rest {
        if is_nan(v) {
            return Ok(v);
        }
        if better(v, best) {
            best = v;
        }
    }
    Ok(best)
}

//==================================================================================
// 3. Public API: wrapper slices
//==================================================================================

/// Applies a plain statistic to the usable values of a wrapper slice.
///
/// Under `MissingPolicy::Propagate` any missing element yields `Ok(MISSING)`.
/// Under `Skip` missing elements are dropped; if fewer than
/// `max(min_count, 1)` remain the result is `Ok(MISSING)`. An empty input is
/// handed to `stat` unchanged, so its own empty-input error surfaces.
pub fn reduce_missing<W>(
    values: &[W],
    config: &ReductionConfig,
    stat: impl FnOnce(&[W::Raw]) -> Result<W::Raw, NumericsError>,
) -> Result<W, NumericsError>
where
    W: SentinelWrapper,
{
    config.validate()?;
    if values.is_empty() {
        return stat(&[]).map(W::from_raw);
    }
    match present_values(values, config) {
        Some(present) if !present.is_empty() => stat(&present).map(W::from_raw),
        _ => Ok(W::MISSING),
    }
}

pub fn variance_missing<F: FloatPrimitive + Summation>(
    values: &[SentinelFloat<F>],
    config: &ReductionConfig,
) -> Result<SentinelFloat<F>, NumericsError> {
    reduce_missing(values, config, variance)
}

pub fn std_dev_missing<F: FloatPrimitive + Summation>(
    values: &[SentinelFloat<F>],
    config: &ReductionConfig,
) -> Result<SentinelFloat<F>, NumericsError> {
    reduce_missing(values, config, std_dev)
}

pub fn median_missing<F: FloatPrimitive>(
    values: &[SentinelFloat<F>],
    config: &ReductionConfig,
) -> Result<SentinelFloat<F>, NumericsError> {
    reduce_missing(values, config, median)
}

pub fn quantile_missing<F: FloatPrimitive>(
    values: &[SentinelFloat<F>],
    p: f64,
    config: &ReductionConfig,
) -> Result<SentinelFloat<F>, NumericsError> {
    reduce_missing(values, config, |present| quantile(present, p))
}

pub fn min_missing<W: SentinelWrapper>(values: &[W], config: &ReductionConfig) -> Result<W, NumericsError> {
    reduce_missing(values, config, min)
}

pub fn max_missing<W: SentinelWrapper>(values: &[W], config: &ReductionConfig) -> Result<W, NumericsError> {
    reduce_missing(values, config, max)
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingPolicy;
    use crate::types::SentinelInt;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_variance_and_std_dev() {
        let values = [2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(close(variance(&values).unwrap(), 32.0 / 7.0));
        assert!(close(std_dev(&values).unwrap(), (32.0f64 / 7.0).sqrt()));
        assert!(matches!(
            variance(&[1.0f64]),
            Err(NumericsError::InsufficientData {
                required: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            variance::<f64>(&[]),
            Err(NumericsError::EmptySequence)
        ));
    }

    #[test]
    fn test_median_and_quantile() {
        assert_eq!(median(&[3.0f64, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[4.0f32, 1.0, 3.0, 2.0]).unwrap(), 2.5);
        let values = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&values, 0.0).unwrap(), 1.0);
        assert_eq!(quantile(&values, 1.0).unwrap(), 5.0);
        assert!(close(quantile(&values, 0.1).unwrap(), 1.4));
        assert!(matches!(
            quantile(&values, 1.5),
            Err(NumericsError::InvalidArgument(_))
        ));
        assert!(quantile(&values, f64::NAN).is_err());
        assert!(median(&[1.0f64, f64::NAN]).unwrap().is_nan());
    }

    #[test]
    fn test_geometric_and_harmonic_means() {
        assert!(close(geometric_mean(&[2.0f64, 8.0]).unwrap(), 4.0));
        assert!(close(harmonic_mean(&[1.0f64, 4.0, 4.0]).unwrap(), 2.0));
        assert!(matches!(
            geometric_mean(&[1.0f64, 0.0]),
            Err(NumericsError::InvalidArgument(_))
        ));
        assert!(harmonic_mean(&[-1.0f64]).is_err());
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(&[3i16, -2, 7]).unwrap(), -2);
        assert_eq!(max(&[3u8, 9, 7]).unwrap(), 9);
        assert!(max(&[1.0f64, f64::NAN, 3.0]).unwrap().is_nan());
        assert!(min::<f32>(&[]).is_err());
    }

    #[test]
    fn test_missing_aware_statistics() {
        let values = [
            SentinelFloat::new(1.0f64).unwrap(),
            SentinelFloat::MISSING,
            SentinelFloat::new(3.0).unwrap(),
        ];
        let propagate = ReductionConfig::default();
        let skip = ReductionConfig::default().with_missing(MissingPolicy::Skip);

        assert!(median_missing(&values, &propagate).unwrap().is_missing());
        assert_eq!(median_missing(&values, &skip).unwrap().into_raw(), 2.0);
        assert_eq!(variance_missing(&values, &skip).unwrap().into_raw(), 2.0);
        assert_eq!(
            quantile_missing(&values, 1.0, &skip).unwrap().into_raw(),
            3.0
        );
        assert!(std_dev_missing(&values[..2], &skip).is_err());

        let ints = [SentinelInt::new(5u32).unwrap(), SentinelInt::MISSING];
        assert_eq!(max_missing(&ints, &skip).unwrap().into_raw(), 5);
        assert!(min_missing(&ints, &propagate).unwrap().is_missing());
        assert!(min_missing(&[SentinelInt::<u32>::MISSING], &skip)
            .unwrap()
            .is_missing());
        assert!(min_missing::<SentinelInt<u32>>(&[], &skip).is_err());
    }
}
