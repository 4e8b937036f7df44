//! This module is the reduction and statistics layer.
//!
//! `sum` holds the sums, the Kahan–Babuška–Neumaier compensated summation and
//! the mean. `descriptive` builds variance, order statistics and the
//! geometric and harmonic means on top of it.

pub mod descriptive;
pub mod sum;

pub use descriptive::{
    geometric_mean, harmonic_mean, max, max_missing, median, median_missing, min, min_missing,
    quantile, quantile_missing, reduce_missing, std_dev, std_dev_missing, variance,
    variance_missing,
};
pub use sum::{
    mean, mean_missing, sum, sum_checked, sum_compensated, sum_missing, sum_with_config,
    sum_with_count, Summation,
};
