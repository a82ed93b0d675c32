// src/error.rs
use thiserror::Error;

/// Errors raised by the numeric engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// A distribution or binning parameter outside its domain
    #[error("invalid parameter `{name}` = {value}: expected {expected}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// NaN or infinity inside a sample set
    #[error("sample {index} is not finite ({value})")]
    NonFiniteSample { index: usize, value: f64 },
}

pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    pub(crate) fn invalid(name: &'static str, value: f64, expected: &'static str) -> Self {
        StatsError::InvalidParameter { name, value, expected }
    }
}

/// Reject `value` unless it is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(StatsError::invalid(name, value, "a finite value > 0"))
    }
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::invalid(name, value, "a finite value"))
    }
}

/// Reject the first NaN or infinite sample.
pub(crate) fn require_finite_samples(samples: &[f64]) -> Result<()> {
    match samples.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(StatsError::NonFiniteSample { index, value: samples[index] }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("sigma", 2.0), Ok(2.0));
        assert!(require_positive("sigma", 0.0).is_err());
        assert!(require_positive("sigma", -1.0).is_err());
        assert!(require_positive("sigma", f64::NAN).is_err());
        assert!(require_positive("sigma", f64::INFINITY).is_err());
    }

    #[test]
    fn test_non_finite_sample_reports_index() {
        let err = require_finite_samples(&[1.0, 2.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, StatsError::NonFiniteSample { index: 2, .. }));
        assert!(require_finite_samples(&[]).is_ok());
    }

    #[test]
    fn test_message_names_parameter() {
        let msg = StatsError::invalid("rate", -1.0, "a finite value > 0").to_string();
        assert!(msg.contains("rate"));
        assert!(msg.contains("-1"));
    }
}
