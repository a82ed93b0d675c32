// src/config/settings.rs
use serde::{Serialize, Deserialize};
use crate::analysis::{BinningPolicy, DistributionParams};

/// User settings, read from `settings.ron` and `STATLAB__*` variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Policy for whole datasets.
    pub binning: BinningPolicy,
    /// Policy for a single group of a dataset (e.g. one team).
    pub grouped_binning: BinningPolicy,
    /// Draw a fitted normal over histograms.
    pub overlay: bool,
    /// Parameter values used when the caller gives none.
    pub defaults: DistributionParams,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            binning: BinningPolicy::general(),
            grouped_binning: BinningPolicy::grouped(),
            overlay: true,
            defaults: DistributionParams::default(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> crate::Result<()> {
        self.binning.validate()?;
        self.grouped_binning.validate()
    }

    /// Binning policy for a whole dataset or for one of its groups.
    pub fn policy_for(&self, grouped: bool) -> &BinningPolicy {
        if grouped {
            &self.grouped_binning
        } else {
            &self.binning
        }
    }
}
