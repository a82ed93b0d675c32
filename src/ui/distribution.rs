// src/ui/distribution.rs
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use statlab::analysis::{Curve, DiscreteDistribution, DiscreteResult, Distribution, EvaluationResult};

use super::{fmt4, fmt_optional, write_ron, OutputFormat};

#[derive(Serialize)]
struct EvaluationOutput<'a> {
    distribution: &'a Distribution,
    x: f64,
    result: &'a EvaluationResult,
}

#[derive(Serialize)]
struct CurveOutput<'a> {
    distribution: &'a Distribution,
    curve: &'a Curve,
}

#[derive(Serialize)]
struct DiscreteOutput<'a> {
    distribution: &'a DiscreteDistribution,
    k: u64,
    result: &'a DiscreteResult,
}

pub fn write_evaluation<W: Write>(
    out: &mut W,
    format: OutputFormat,
    distribution: &Distribution,
    x: f64,
    result: &EvaluationResult,
) -> Result<()> {
    if format == OutputFormat::Ron {
        return write_ron(out, &EvaluationOutput { distribution, x, result });
    }

    writeln!(out, "{} at x = {}", distribution, x)?;
    writeln!(out, "  PDF       {}", fmt4(result.pdf))?;
    writeln!(out, "  CDF       {}", fmt_optional(result.cdf))?;
    writeln!(out, "  Mean      {}", fmt4(result.mean))?;
    writeln!(out, "  Variance  {}", fmt4(result.variance))?;
    Ok(())
}

pub fn write_curve<W: Write>(
    out: &mut W,
    format: OutputFormat,
    distribution: &Distribution,
    curve: &Curve,
) -> Result<()> {
    if format == OutputFormat::Ron {
        return write_ron(out, &CurveOutput { distribution, curve });
    }

    writeln!(out, "{}", distribution)?;
    writeln!(out, "{:>10}  {:>10}  {:>10}", "x", "pdf", "cdf")?;
    for point in curve.points() {
        // Labels use two decimals
        writeln!(
            out,
            "{:>10.2}  {:>10}  {:>10}",
            point.x,
            fmt4(point.pdf),
            fmt_optional(point.cdf)
        )?;
    }
    Ok(())
}

pub fn write_discrete<W: Write>(
    out: &mut W,
    format: OutputFormat,
    distribution: &DiscreteDistribution,
    k: u64,
    result: &DiscreteResult,
) -> Result<()> {
    if format == OutputFormat::Ron {
        return write_ron(out, &DiscreteOutput { distribution, k, result });
    }

    writeln!(out, "{} at k = {}", distribution, k)?;
    writeln!(out, "  P(X = k)  {}", fmt4(result.probability))?;
    writeln!(out, "  Mean      {}", fmt4(result.mean))?;
    writeln!(out, "  Variance  {}", fmt4(result.variance))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: OutputFormat) -> String {
        let d = Distribution::gamma(2.0, 2.0).unwrap();
        let r = d.evaluate(1.0).unwrap();
        let mut out = Vec::new();
        write_evaluation(&mut out, format, &d, 1.0, &r).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_marks_missing_cdf() {
        let text = render(OutputFormat::Text);
        assert!(text.starts_with("Gamma(k=2, θ=2) at x = 1"));
        assert!(text.contains("CDF       -"));
        assert!(text.contains("Mean      4.0000"));
    }

    #[test]
    fn test_ron_output() {
        let text = render(OutputFormat::Ron);
        assert!(text.contains("cdf: None"));
        assert!(text.contains("variance: 8.0"));
    }

    #[test]
    fn test_curve_rows() {
        let d = Distribution::standard_normal();
        let curve = d.curve().unwrap();
        let mut out = Vec::new();
        write_curve(&mut out, OutputFormat::Text, &d, &curve).unwrap();
        let text = String::from_utf8(out).unwrap();
        // title, header, one row per point
        assert_eq!(text.lines().count(), curve.len() + 2);
        assert!(text.lines().nth(2).unwrap().trim_start().starts_with("-4.00"));
    }
}
