// src/analysis/report.rs

use serde::{Serialize, Deserialize};

use super::histogram::{bin_with, BinningPolicy, Histogram};
use super::summary::{describe, SampleStatistics};
use crate::error::Result;

/// Statistics and histogram for one sample set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetReport {
    pub name: String,
    pub statistics: SampleStatistics,
    pub histogram: Histogram,
    pub labels: Vec<String>,
}

impl DatasetReport {
    pub fn build(name: impl Into<String>, samples: &[f64], policy: &BinningPolicy, overlay: bool) -> Result<Self> {
        let statistics = describe(samples)?;
        let mut histogram = bin_with(samples, policy)?;
        if overlay && statistics.std_dev > 0.0 {
            histogram = histogram.with_normal_overlay(statistics.mean, statistics.std_dev)?;
        }
        let labels = histogram.labels();

        Ok(Self {
            name: name.into(),
            statistics,
            histogram,
            labels,
        })
    }
}
