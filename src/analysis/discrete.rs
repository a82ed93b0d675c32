// src/analysis/discrete.rs

use serde::{Serialize, Deserialize};
use std::fmt;

use super::special::ln_gamma;
use crate::error::{require_positive, Result, StatsError};

/// `n!` as a float. `0! = 1! = 1`.
pub fn factorial(n: u64) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// Number of ways to choose `r` items out of `n`; zero when `r > n`.
pub fn combination(n: u64, r: u64) -> f64 {
    if r > n {
        return 0.0;
    }
    // Multiplicative form keeps intermediate values small.
    let r = r.min(n - r);
    (1..=r).fold(1.0, |acc, i| acc * (n - r + i) as f64 / i as f64)
}

// ln C(n, k) = ln Γ(n+1) − ln Γ(k+1) − ln Γ(n−k+1), for k <= n
fn ln_choose(n: u64, k: u64) -> f64 {
    ln_gamma(n as f64 + 1.0) - ln_gamma(k as f64 + 1.0) - ln_gamma((n - k) as f64 + 1.0)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DiscreteDistribution {
    Binomial { trials: u64, p: f64 },
    /// Trials up to and including the first success, `k >= 1`.
    Geometric { p: f64 },
    /// Trials up to and including the `successes`-th success, `k >= successes`.
    NegativeBinomial { successes: u64, p: f64 },
    Poisson { lambda: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DiscreteResult {
    pub probability: f64,
    pub mean: f64,
    pub variance: f64,
}

fn require_probability(name: &'static str, p: f64, allow_zero: bool) -> Result<f64> {
    let lower_ok = if allow_zero { p >= 0.0 } else { p > 0.0 };
    if p.is_finite() && lower_ok && p <= 1.0 {
        Ok(p)
    } else {
        Err(StatsError::InvalidParameter {
            name,
            value: p,
            expected: if allow_zero { "a probability in [0, 1]" } else { "a probability in (0, 1]" },
        })
    }
}

impl DiscreteDistribution {
    pub fn binomial(trials: u64, p: f64) -> Result<Self> {
        Self::Binomial { trials, p }.validated()
    }

    pub fn geometric(p: f64) -> Result<Self> {
        Self::Geometric { p }.validated()
    }

    pub fn negative_binomial(successes: u64, p: f64) -> Result<Self> {
        Self::NegativeBinomial { successes, p }.validated()
    }

    pub fn poisson(lambda: f64) -> Result<Self> {
        Self::Poisson { lambda }.validated()
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Binomial { p, .. } => {
                require_probability("p", p, true)?;
            }
            Self::Geometric { p } => {
                require_probability("p", p, false)?;
            }
            Self::NegativeBinomial { successes, p } => {
                if successes == 0 {
                    return Err(StatsError::InvalidParameter {
                        name: "successes",
                        value: 0.0,
                        expected: "at least one success",
                    });
                }
                require_probability("p", p, false)?;
            }
            Self::Poisson { lambda } => {
                require_positive("lambda", lambda)?;
            }
        }
        Ok(())
    }

    /// Probability of exactly `k`; zero outside the support.
    ///
    /// Evaluated in log space so large `n`, `k` or `λ` stay finite where
    /// `factorial` and `combination` would overflow.
    pub fn pmf(&self, k: u64) -> Result<f64> {
        self.validate()?;
        let probability = match *self {
            Self::Binomial { trials, p } => {
                if k > trials {
                    0.0
                } else if p == 0.0 {
                    if k == 0 { 1.0 } else { 0.0 }
                } else if p == 1.0 {
                    if k == trials { 1.0 } else { 0.0 }
                } else {
                    (ln_choose(trials, k) + k as f64 * p.ln() + (trials - k) as f64 * (1.0 - p).ln()).exp()
                }
            }
            Self::Geometric { p } => {
                if k == 0 {
                    0.0
                } else {
                    (1.0 - p).powf((k - 1) as f64) * p
                }
            }
            Self::NegativeBinomial { successes, p } => {
                if k < successes {
                    0.0
                } else if p == 1.0 {
                    if k == successes { 1.0 } else { 0.0 }
                } else {
                    (ln_choose(k - 1, successes - 1)
                        + successes as f64 * p.ln()
                        + (k - successes) as f64 * (1.0 - p).ln())
                    .exp()
                }
            }
            Self::Poisson { lambda } => {
                (k as f64 * lambda.ln() - lambda - ln_gamma(k as f64 + 1.0)).exp()
            }
        };
        Ok(probability)
    }

    pub fn mean(&self) -> f64 {
        match *self {
            Self::Binomial { trials, p } => trials as f64 * p,
            Self::Geometric { p } => 1.0 / p,
            Self::NegativeBinomial { successes, p } => successes as f64 / p,
            Self::Poisson { lambda } => lambda,
        }
    }

    pub fn variance(&self) -> f64 {
        match *self {
            Self::Binomial { trials, p } => trials as f64 * p * (1.0 - p),
            Self::Geometric { p } => (1.0 - p) / (p * p),
            Self::NegativeBinomial { successes, p } => successes as f64 * (1.0 - p) / (p * p),
            Self::Poisson { lambda } => lambda,
        }
    }

    pub fn evaluate(&self, k: u64) -> Result<DiscreteResult> {
        Ok(DiscreteResult {
            probability: self.pmf(k)?,
            mean: self.mean(),
            variance: self.variance(),
        })
    }
}

impl fmt::Display for DiscreteDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binomial { trials, p } => write!(f, "Binomial(n={}, p={})", trials, p),
            Self::Geometric { p } => write!(f, "Geometric(p={})", p),
            Self::NegativeBinomial { successes, p } => {
                write!(f, "NegativeBinomial(r={}, p={})", successes, p)
            }
            Self::Poisson { lambda } => write!(f, "Poisson(λ={})", lambda),
        }
    }
}
