// src/analysis/summary.rs

use serde::{Serialize, Deserialize};

use crate::error::{require_finite_samples, Result};
use crate::utils::{min_max, sorted_copy};

/// Descriptive statistics of a sample set.
///
/// Variance is the population variance (divided by `n`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SampleStatistics {
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

/// Compute every statistic in one go. An empty set gives all zeros.
pub fn describe(samples: &[f64]) -> Result<SampleStatistics> {
    require_finite_samples(samples)?;
    if samples.is_empty() {
        return Ok(SampleStatistics::default());
    }

    let mean = mean(samples);
    let variance = population_variance(samples, mean);
    let (min, max) = min_max(samples).unwrap_or_default();

    Ok(SampleStatistics {
        count: samples.len(),
        mean,
        variance,
        std_dev: variance.sqrt(),
        median: median(samples),
        min,
        max,
        range: max - min,
    })
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

pub fn population_variance(samples: &[f64], mean: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64
}

/// Middle value of a sorted copy; even lengths average the two middle values.
pub fn median(samples: &[f64]) -> f64 {
    let sorted = sorted_copy(samples);
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 0 => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
        _ => sorted[n / 2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sample() {
        let stats = describe(&[1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0]).unwrap();
        assert_eq!(stats.count, 10);
        assert_eq!(stats.mean, 3.0);
        assert!((stats.variance - 1.0).abs() < 1e-12);
        assert!((stats.std_dev - 1.0).abs() < 1e-12);
        assert_eq!(stats.median, 3.0);
        assert_eq!((stats.min, stats.max, stats.range), (1.0, 4.0, 3.0));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(describe(&[]).unwrap(), SampleStatistics::default());
        assert_eq!(median(&[]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_median_odd_and_unsorted() {
        assert_eq!(median(&[9.0, 1.0, 5.0]), 5.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_single_value() {
        let stats = describe(&[7.5]).unwrap();
        assert_eq!(stats.mean, 7.5);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.range, 0.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(describe(&[1.0, f64::INFINITY]).is_err());
    }
}
