// src/analysis/histogram.rs

use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use super::distribution::Distribution;
use super::summary::describe;
use crate::error::{require_finite_samples, Result, StatsError};
use crate::utils::min_max;

/// Rule used to derive a bin count from the sample size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BinEstimator {
    /// `ceil(log2(n) + 1)`
    Sturges,
    /// `ceil(sqrt(n))`
    SquareRoot,
}

impl BinEstimator {
    pub fn estimate(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let n = n as f64;
        let bins = match self {
            BinEstimator::Sturges => n.log2() + 1.0,
            BinEstimator::SquareRoot => n.sqrt(),
        };
        bins.ceil() as usize
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BinningPolicy {
    pub estimator: BinEstimator,
    pub min_bins: usize,
    pub max_bins: usize,
}

impl Default for BinningPolicy {
    fn default() -> Self {
        Self::general()
    }
}

impl BinningPolicy {
    /// Sturges' rule clamped to [5, 30], for whole datasets.
    pub fn general() -> Self {
        Self {
            estimator: BinEstimator::Sturges,
            min_bins: 5,
            max_bins: 30,
        }
    }

    /// Square-root rule clamped to [5, 20], for small per-group datasets.
    pub fn grouped() -> Self {
        Self {
            estimator: BinEstimator::SquareRoot,
            min_bins: 5,
            max_bins: 20,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_bins == 0 {
            return Err(StatsError::InvalidParameter {
                name: "min_bins",
                value: 0.0,
                expected: "at least one bin",
            });
        }
        if self.min_bins > self.max_bins {
            return Err(StatsError::InvalidParameter {
                name: "max_bins",
                value: self.max_bins as f64,
                expected: "a value no smaller than `min_bins`",
            });
        }
        Ok(())
    }

    pub fn bin_count(&self, n: usize) -> usize {
        self.estimator.estimate(n).clamp(self.min_bins, self.max_bins)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Frequency table over equal-width bins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Histogram {
    bins: Vec<Bin>,
    bin_width: f64,
    total: usize,
    overlay: Option<Vec<f64>>,
}

impl Histogram {
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Number of samples that were binned.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|b| b.count).collect()
    }

    pub fn edges(&self) -> Vec<(f64, f64)> {
        self.bins.iter().map(|b| (b.start, b.end)).collect()
    }

    pub fn centers(&self) -> Vec<f64> {
        self.bins.iter().map(Bin::center).collect()
    }

    /// Scaled normal density at each bin center, when one was attached.
    pub fn overlay(&self) -> Option<&[f64]> {
        self.overlay.as_deref()
    }

    /// Span from the first bin start to the last bin end.
    pub fn range(&self) -> f64 {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => last.end - first.start,
            _ => 0.0,
        }
    }

    /// `"start-end"` label per bin, precision chosen by the data range.
    pub fn labels(&self) -> Vec<String> {
        let range = self.range();
        self.bins
            .iter()
            .map(|b| format!("{}-{}", format_edge(b.start, range), format_edge(b.end, range)))
            .collect()
    }

    /// Attach `pdf(center) · total · bin_width` for a normal with the given
    /// moments, putting the density on the count axis of the bars.
    pub fn with_normal_overlay(mut self, mean: f64, std_dev: f64) -> Result<Self> {
        let normal = Distribution::normal(mean, std_dev)?;
        let scale = self.total as f64 * self.bin_width;
        let overlay = self
            .bins
            .iter()
            .map(|b| Ok(normal.pdf(b.center())? * scale))
            .collect::<Result<Vec<f64>>>()?;
        self.overlay = Some(overlay);
        Ok(self)
    }

    /// Overlay a normal fitted to `samples` by population mean and standard
    /// deviation. Left without overlay when the samples do not vary.
    pub fn with_fitted_overlay(self, samples: &[f64]) -> Result<Self> {
        let stats = describe(samples)?;
        if stats.std_dev > 0.0 {
            self.with_normal_overlay(stats.mean, stats.std_dev)
        } else {
            warn!(count = stats.count, "samples do not vary, skipping normal overlay");
            Ok(self)
        }
    }
}

/// Histogram using Sturges' rule clamped to `[min_bins, max_bins]`.
pub fn bin(samples: &[f64], min_bins: usize, max_bins: usize) -> Result<Histogram> {
    bin_with(
        samples,
        &BinningPolicy {
            estimator: BinEstimator::Sturges,
            min_bins,
            max_bins,
        },
    )
}

pub fn bin_with(samples: &[f64], policy: &BinningPolicy) -> Result<Histogram> {
    policy.validate()?;
    require_finite_samples(samples)?;

    let Some((min, max)) = min_max(samples) else {
        return Ok(Histogram::default());
    };
    let range = max - min;
    let bin_count = policy.bin_count(samples.len());
    let bin_width = range / bin_count as f64;

    if bin_width == 0.0 {
        warn!(value = min, count = samples.len(), "samples have zero range, using a single bin");
        return Ok(Histogram {
            bins: vec![Bin { start: min, end: max, count: samples.len() }],
            bin_width: 0.0,
            total: samples.len(),
            overlay: None,
        });
    }

    debug!(n = samples.len(), bin_count, bin_width, "binning samples");

    let mut counts = vec![0usize; bin_count];
    for &value in samples {
        // The maximum lands on index `bin_count`; negative indices cannot occur
        // since `value >= min`, and `as usize` saturates at zero regardless.
        let index = (((value - min) / bin_width).floor() as usize).min(bin_count - 1);
        counts[index] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = min + i as f64 * bin_width;
            Bin { start, end: start + bin_width, count }
        })
        .collect();

    Ok(Histogram {
        bins,
        bin_width,
        total: samples.len(),
        overlay: None,
    })
}

fn format_edge(value: f64, range: f64) -> String {
    if range >= 1000.0 {
        let rounded = value.round();
        // Avoid printing "-0".
        return format!("{}", if rounded == 0.0 { 0.0 } else { rounded });
    }
    let decimals = if range < 1.0 {
        3
    } else if range < 10.0 {
        2
    } else {
        1
    };
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::distribution::normal_pdf;

    #[test]
    fn test_counts_cover_every_sample() {
        let samples = [0.0, 1.0, 2.5, 3.3, 7.0, 9.99, 10.0, 10.0];
        let h = bin(&samples, 5, 30).unwrap();
        assert_eq!(h.counts().iter().sum::<usize>(), samples.len());
        assert_eq!(h.total(), samples.len());
        assert_eq!(h.counts().len(), h.edges().len());
    }

    #[test]
    fn test_maximum_goes_to_last_bin() {
        let h = bin(&[0.0, 10.0], 5, 30).unwrap();
        assert_eq!(h.counts(), vec![1, 0, 0, 0, 1]);
        assert_eq!(h.bin_width(), 2.0);
        assert_eq!(h.edges()[4], (8.0, 10.0));
    }

    #[test]
    fn test_identical_samples_single_bin() {
        let h = bin(&[4.2; 7], 5, 30).unwrap();
        assert_eq!(h.len(), 1);
        assert_eq!(h.counts(), vec![7]);
        assert_eq!(h.edges(), vec![(4.2, 4.2)]);
        assert_eq!(h.bin_width(), 0.0);
    }

    #[test]
    fn test_empty_samples() {
        let h = bin(&[], 5, 30).unwrap();
        assert!(h.is_empty());
        assert_eq!(h.total(), 0);
        assert!(h.labels().is_empty());
    }

    #[test]
    fn test_sturges_estimates() {
        assert_eq!(BinEstimator::Sturges.estimate(0), 0);
        assert_eq!(BinEstimator::Sturges.estimate(1), 1);
        assert_eq!(BinEstimator::Sturges.estimate(10), 5);
        assert_eq!(BinEstimator::Sturges.estimate(1000), 11);
        assert_eq!(BinEstimator::Sturges.estimate(1024), 11);
    }

    #[test]
    fn test_square_root_estimates() {
        assert_eq!(BinEstimator::SquareRoot.estimate(9), 3);
        assert_eq!(BinEstimator::SquareRoot.estimate(40), 7);
        assert_eq!(BinningPolicy::grouped().bin_count(9), 5);
        assert_eq!(BinningPolicy::grouped().bin_count(1000), 20);
    }

    #[test]
    fn test_policy_clamps() {
        let general = BinningPolicy::general();
        assert_eq!(general.bin_count(3), 5);
        assert_eq!(general.bin_count(1000), 11);
        let tight = BinningPolicy { estimator: BinEstimator::Sturges, min_bins: 2, max_bins: 4 };
        assert_eq!(tight.bin_count(1000), 4);
    }

    #[test]
    fn test_invalid_policy() {
        assert!(bin(&[1.0, 2.0], 0, 10).is_err());
        assert!(bin(&[1.0, 2.0], 10, 5).is_err());
    }

    #[test]
    fn test_non_finite_sample() {
        let err = bin(&[1.0, f64::NAN, 3.0], 5, 30).unwrap_err();
        assert!(matches!(err, StatsError::NonFiniteSample { index: 1, .. }));
    }

    #[test]
    fn test_label_precision() {
        assert_eq!(format_edge(0.12345, 0.5), "0.123");
        assert_eq!(format_edge(1.23456, 5.0), "1.23");
        assert_eq!(format_edge(12.345, 50.0), "12.3");
        assert_eq!(format_edge(123.45, 500.0), "123.5");
        assert_eq!(format_edge(1234.5, 5000.0), "1235");
        assert_eq!(format_edge(-0.2, 5000.0), "0");
    }

    #[test]
    fn test_labels_follow_edges() {
        let h = bin(&[0.0, 10.0], 5, 30).unwrap();
        assert_eq!(h.labels()[0], "0.0-2.0");
        assert_eq!(h.labels()[4], "8.0-10.0");
    }

    #[test]
    fn test_normal_overlay_scaling() {
        let samples = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let h = bin(&samples, 5, 30).unwrap().with_normal_overlay(5.0, 2.0).unwrap();
        let overlay = h.overlay().unwrap();
        assert_eq!(overlay.len(), h.len());
        for (value, b) in overlay.iter().zip(h.bins()) {
            let expected = normal_pdf(b.center(), 5.0, 2.0).unwrap() * 11.0 * h.bin_width();
            assert!((value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_overlay_rejects_bad_sigma() {
        let h = bin(&[1.0, 2.0, 3.0], 5, 30).unwrap();
        assert!(h.with_normal_overlay(2.0, 0.0).is_err());
    }

    #[test]
    fn test_fitted_overlay_skipped_without_spread() {
        let samples = [3.0; 4];
        let h = bin(&samples, 5, 30).unwrap().with_fitted_overlay(&samples).unwrap();
        assert!(h.overlay().is_none());
    }
}
