// src/ui/mod.rs
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

pub mod distribution;
pub mod histogram;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text tables
    Text,
    /// Pretty-printed RON
    Ron,
}

pub(crate) fn write_ron<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let content = ron::ser::to_string_pretty(
        value,
        ron::ser::PrettyConfig::new()
            .new_line("\n".to_string())
            .depth_limit(4)
            .separate_tuple_members(true),
    )?;
    writeln!(out, "{}", content)?;
    Ok(())
}

/// Fixed four decimals, as shown next to every statistic.
pub(crate) fn fmt4(value: f64) -> String {
    format!("{:.4}", value)
}

pub(crate) fn fmt_optional(value: Option<f64>) -> String {
    value.map(fmt4).unwrap_or_else(|| "-".to_string())
}
