// src/ui/histogram.rs
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use statlab::analysis::{DatasetReport, Distribution};

use super::{fmt4, write_ron, OutputFormat};

const BAR_WIDTH: usize = 40;

#[derive(Serialize)]
struct SimulationOutput<'a> {
    distribution: &'a Distribution,
    expected_mean: f64,
    expected_variance: f64,
    report: &'a DatasetReport,
}

pub fn write_reports<W: Write>(out: &mut W, format: OutputFormat, reports: &[DatasetReport]) -> Result<()> {
    if format == OutputFormat::Ron {
        return write_ron(out, &reports);
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_report_text(out, report)?;
    }
    Ok(())
}

pub fn write_simulation<W: Write>(
    out: &mut W,
    format: OutputFormat,
    distribution: &Distribution,
    report: &DatasetReport,
) -> Result<()> {
    let output = SimulationOutput {
        distribution,
        expected_mean: distribution.mean(),
        expected_variance: distribution.variance(),
        report,
    };
    if format == OutputFormat::Ron {
        return write_ron(out, &output);
    }

    writeln!(
        out,
        "Expected  mean {}  variance {}",
        fmt4(output.expected_mean),
        fmt4(output.expected_variance)
    )?;
    write_report_text(out, report)
}

fn write_report_text<W: Write>(out: &mut W, report: &DatasetReport) -> Result<()> {
    let stats = &report.statistics;
    writeln!(out, "{} (n={})", report.name, stats.count)?;
    if stats.count == 0 {
        writeln!(out, "  no samples")?;
        return Ok(());
    }

    writeln!(
        out,
        "  mean {}  median {}  std dev {}  variance {}",
        fmt4(stats.mean),
        fmt4(stats.median),
        fmt4(stats.std_dev),
        fmt4(stats.variance)
    )?;
    writeln!(
        out,
        "  min {}  max {}  range {}",
        fmt4(stats.min),
        fmt4(stats.max),
        fmt4(stats.range)
    )?;

    let histogram = &report.histogram;
    let peak = histogram.counts().into_iter().max().unwrap_or(0);
    let label_width = report.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let overlay = histogram.overlay();

    for (i, (label, bin)) in report.labels.iter().zip(histogram.bins()).enumerate() {
        let bar = "#".repeat(bar_length(bin.count, peak));
        match overlay.and_then(|o| o.get(i)) {
            Some(expected) => writeln!(
                out,
                "  {:>lw$} | {:>5} | {:<bw$} | {:.2}",
                label,
                bin.count,
                bar,
                expected,
                lw = label_width,
                bw = BAR_WIDTH
            )?,
            None => writeln!(
                out,
                "  {:>lw$} | {:>5} | {}",
                label,
                bin.count,
                bar,
                lw = label_width
            )?,
        }
    }
    Ok(())
}

fn bar_length(count: usize, peak: usize) -> usize {
    if peak == 0 {
        return 0;
    }
    (count * BAR_WIDTH + peak / 2) / peak
}
