// src/analysis/distribution.rs

use serde::{Serialize, Deserialize};
use std::f64::consts::{PI, SQRT_2};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::special::{erf, ln_gamma};
use crate::error::{require_finite, require_positive, Result, StatsError};

/// Number of equal intervals a curve is sampled over.
pub const CURVE_STEPS: usize = 100;

/// The distributions a caller can pick from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DistributionType {
    Normal,
    StandardNormal,
    Exponential,
    StandardExponential,
    Uniform,
    StandardUniform,
    Gamma,
}

impl Default for DistributionType {
    fn default() -> Self {
        DistributionType::Normal
    }
}

impl DistributionType {
    pub const ALL: [DistributionType; 7] = [
        DistributionType::Normal,
        DistributionType::StandardNormal,
        DistributionType::Exponential,
        DistributionType::StandardExponential,
        DistributionType::Uniform,
        DistributionType::StandardUniform,
        DistributionType::Gamma,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DistributionType::Normal => "normal",
            DistributionType::StandardNormal => "standard-normal",
            DistributionType::Exponential => "exponential",
            DistributionType::StandardExponential => "standard-exponential",
            DistributionType::Uniform => "uniform",
            DistributionType::StandardUniform => "standard-uniform",
            DistributionType::Gamma => "gamma",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistributionType::Normal => "Normal",
            DistributionType::StandardNormal => "Standard Normal",
            DistributionType::Exponential => "Exponential",
            DistributionType::StandardExponential => "Standard Exponential",
            DistributionType::Uniform => "Uniform",
            DistributionType::StandardUniform => "Standard Uniform",
            DistributionType::Gamma => "Gamma",
        }
    }

    pub fn resolve(&self, params: &DistributionParams) -> Result<Distribution> {
        params.resolve(*self)
    }

    /// Sampled curve for this selection.
    ///
    /// Identical to `Distribution::curve` except for the standard uniform,
    /// which is plotted over `[-0.5, 1.5]` instead of `[-1, 2]`.
    pub fn curve(&self, params: &DistributionParams) -> Result<Curve> {
        let distribution = self.resolve(params)?;
        match self {
            DistributionType::StandardUniform => Ok(distribution.sample_curve(-0.5, 1.5)),
            _ => distribution.curve(),
        }
    }
}

impl fmt::Display for DistributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        DistributionType::ALL
            .iter()
            .copied()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = DistributionType::ALL.iter().map(|t| t.name()).collect();
                format!("unknown distribution `{}` (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Parameter values for every variant, owned by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DistributionParams {
    pub mean: f64,
    pub std_dev: f64,
    pub rate: f64,
    pub lower: f64,
    pub upper: f64,
    pub shape: f64,
    pub scale: f64,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
            rate: 1.0,
            lower: 0.0,
            upper: 1.0,
            shape: 2.0,
            scale: 2.0,
        }
    }
}

impl DistributionParams {
    pub fn resolve(&self, dist_type: DistributionType) -> Result<Distribution> {
        match dist_type {
            DistributionType::Normal => Distribution::normal(self.mean, self.std_dev),
            DistributionType::StandardNormal => Ok(Distribution::standard_normal()),
            DistributionType::Exponential => Distribution::exponential(self.rate),
            DistributionType::StandardExponential => Ok(Distribution::standard_exponential()),
            DistributionType::Uniform => Distribution::uniform(self.lower, self.upper),
            DistributionType::StandardUniform => Ok(Distribution::standard_uniform()),
            DistributionType::Gamma => Distribution::gamma(self.shape, self.scale),
        }
    }
}

/// A continuous distribution with its parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Distribution {
    Normal { mean: f64, std_dev: f64 },
    Exponential { rate: f64 },
    Uniform { lower: f64, upper: f64 },
    Gamma { shape: f64, scale: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResult {
    pub pdf: f64,
    /// `None` for the gamma distribution.
    pub cdf: Option<f64>,
    pub mean: f64,
    pub variance: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub pdf: f64,
    pub cdf: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Curve {
    points: Vec<CurvePoint>,
}

impl Curve {
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn pdf_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.pdf).collect()
    }

    /// The CDF column, or `None` when the distribution has no CDF.
    pub fn cdf_values(&self) -> Option<Vec<f64>> {
        self.points.iter().map(|p| p.cdf).collect()
    }
}

impl Distribution {
    pub fn normal(mean: f64, std_dev: f64) -> Result<Self> {
        Self::Normal { mean, std_dev }.validated()
    }

    pub fn exponential(rate: f64) -> Result<Self> {
        Self::Exponential { rate }.validated()
    }

    pub fn uniform(lower: f64, upper: f64) -> Result<Self> {
        Self::Uniform { lower, upper }.validated()
    }

    pub fn gamma(shape: f64, scale: f64) -> Result<Self> {
        Self::Gamma { shape, scale }.validated()
    }

    pub fn standard_normal() -> Self {
        Self::Normal { mean: 0.0, std_dev: 1.0 }
    }

    pub fn standard_exponential() -> Self {
        Self::Exponential { rate: 1.0 }
    }

    pub fn standard_uniform() -> Self {
        Self::Uniform { lower: 0.0, upper: 1.0 }
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Check the parameter invariants. Variants built by hand rather than
    /// through the constructors are caught here on every evaluation.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Normal { mean, std_dev } => {
                require_finite("mean", mean)?;
                require_positive("std_dev", std_dev)?;
            }
            Self::Exponential { rate } => {
                require_positive("rate", rate)?;
            }
            Self::Uniform { lower, upper } => {
                require_finite("lower", lower)?;
                require_finite("upper", upper)?;
                if lower >= upper {
                    return Err(StatsError::InvalidParameter {
                        name: "upper",
                        value: upper,
                        expected: "a value greater than `lower`",
                    });
                }
                if !(upper - lower).is_finite() {
                    return Err(StatsError::InvalidParameter {
                        name: "upper",
                        value: upper,
                        expected: "a bound whose distance from `lower` is finite",
                    });
                }
            }
            Self::Gamma { shape, scale } => {
                require_positive("shape", shape)?;
                require_positive("scale", scale)?;
            }
        }
        Ok(())
    }

    pub fn has_cdf(&self) -> bool {
        !matches!(self, Self::Gamma { .. })
    }

    pub fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        Ok(self.density(x))
    }

    pub fn cdf(&self, x: f64) -> Result<Option<f64>> {
        self.validate()?;
        Ok(self.cumulative(x))
    }

    /// Mean of the distribution. Assumes a validated value.
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Normal { mean, .. } => mean,
            Self::Exponential { rate } => 1.0 / rate,
            Self::Uniform { lower, upper } => (lower + upper) / 2.0,
            Self::Gamma { shape, scale } => shape * scale,
        }
    }

    /// Variance of the distribution. Assumes a validated value.
    pub fn variance(&self) -> f64 {
        match *self {
            Self::Normal { std_dev, .. } => std_dev * std_dev,
            Self::Exponential { rate } => 1.0 / (rate * rate),
            Self::Uniform { lower, upper } => (upper - lower).powi(2) / 12.0,
            Self::Gamma { shape, scale } => shape * scale * scale,
        }
    }

    pub fn evaluate(&self, x: f64) -> Result<EvaluationResult> {
        self.validate()?;
        Ok(EvaluationResult {
            pdf: self.density(x),
            cdf: self.cumulative(x),
            mean: self.mean(),
            variance: self.variance(),
        })
    }

    /// Plot window covering the meaningful part of the support.
    pub fn domain(&self) -> (f64, f64) {
        match *self {
            Self::Normal { mean, std_dev } => (mean - 4.0 * std_dev, mean + 4.0 * std_dev),
            Self::Exponential { rate } => (0.0, 5.0 / rate),
            Self::Uniform { lower, upper } => (lower - 1.0, upper + 1.0),
            Self::Gamma { shape, scale } => (0.0, shape * scale + 4.0 * shape.sqrt() * scale),
        }
    }

    /// `CURVE_STEPS + 1` points evenly spread over `domain()`.
    pub fn curve(&self) -> Result<Curve> {
        self.validate()?;
        let (start, end) = self.domain();
        Ok(self.sample_curve(start, end))
    }

    fn sample_curve(&self, start: f64, end: f64) -> Curve {
        debug!(distribution = %self, start, end, steps = CURVE_STEPS, "sampling curve");
        let step = (end - start) / CURVE_STEPS as f64;
        let points = (0..=CURVE_STEPS)
            .map(|i| {
                let x = start + step * i as f64;
                CurvePoint {
                    x,
                    pdf: self.density(x),
                    cdf: self.cumulative(x),
                }
            })
            .collect();
        Curve { points }
    }

    fn density(&self, x: f64) -> f64 {
        match *self {
            Self::Normal { mean, std_dev } => {
                let z = (x - mean) / std_dev;
                (1.0 / (std_dev * (2.0 * PI).sqrt())) * (-0.5 * z * z).exp()
            }
            Self::Exponential { rate } => {
                if x >= 0.0 {
                    rate * (-rate * x).exp()
                } else {
                    0.0
                }
            }
            Self::Uniform { lower, upper } => {
                if x >= lower && x <= upper {
                    1.0 / (upper - lower)
                } else {
                    0.0
                }
            }
            Self::Gamma { shape, scale } => {
                if x <= 0.0 {
                    return 0.0;
                }
                // Log space keeps large shapes from overflowing x^(k-1) and Γ(k).
                ((shape - 1.0) * x.ln() - x / scale - shape * scale.ln() - ln_gamma(shape)).exp()
            }
        }
    }

    fn cumulative(&self, x: f64) -> Option<f64> {
        match *self {
            Self::Normal { mean, std_dev } => {
                Some(0.5 * (1.0 + erf((x - mean) / (std_dev * SQRT_2))))
            }
            Self::Exponential { rate } => {
                Some(if x >= 0.0 { 1.0 - (-rate * x).exp() } else { 0.0 })
            }
            Self::Uniform { lower, upper } => Some(if x < lower {
                0.0
            } else if x > upper {
                1.0
            } else {
                (x - lower) / (upper - lower)
            }),
            // No incomplete gamma function, so no CDF.
            Self::Gamma { .. } => None,
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal { mean, std_dev } => write!(f, "Normal(μ={}, σ={})", mean, std_dev),
            Self::Exponential { rate } => write!(f, "Exponential(λ={})", rate),
            Self::Uniform { lower, upper } => write!(f, "Uniform(a={}, b={})", lower, upper),
            Self::Gamma { shape, scale } => write!(f, "Gamma(k={}, θ={})", shape, scale),
        }
    }
}

pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> Result<f64> {
    Distribution::normal(mean, std_dev)?.pdf(x)
}

pub fn normal_cdf(x: f64, mean: f64, std_dev: f64) -> Result<f64> {
    let d = Distribution::normal(mean, std_dev)?;
    Ok(d.cumulative(x).unwrap_or_default())
}

pub fn exponential_pdf(x: f64, rate: f64) -> Result<f64> {
    Distribution::exponential(rate)?.pdf(x)
}

pub fn exponential_cdf(x: f64, rate: f64) -> Result<f64> {
    let d = Distribution::exponential(rate)?;
    Ok(d.cumulative(x).unwrap_or_default())
}

pub fn uniform_pdf(x: f64, lower: f64, upper: f64) -> Result<f64> {
    Distribution::uniform(lower, upper)?.pdf(x)
}

pub fn uniform_cdf(x: f64, lower: f64, upper: f64) -> Result<f64> {
    let d = Distribution::uniform(lower, upper)?;
    Ok(d.cumulative(x).unwrap_or_default())
}

pub fn gamma_pdf(x: f64, shape: f64, scale: f64) -> Result<f64> {
    Distribution::gamma(shape, scale)?.pdf(x)
}
