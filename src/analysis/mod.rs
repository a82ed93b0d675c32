// src/analysis/mod.rs
pub mod special;
pub mod distribution;
pub mod discrete;
pub mod histogram;
pub mod summary;
pub mod sampling;
pub mod report;

// Re-export commonly used types
pub use distribution::{
    Distribution,
    DistributionType,
    DistributionParams,
    EvaluationResult,
    Curve,
    CurvePoint,
    CURVE_STEPS,
};
pub use discrete::{DiscreteDistribution, DiscreteResult, factorial, combination};
pub use histogram::{bin, bin_with, Bin, BinEstimator, BinningPolicy, Histogram};
pub use summary::{describe, SampleStatistics};
pub use report::DatasetReport;
pub use special::{erf, gamma, ln_gamma};
