// src/app.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing::info;

use statlab::analysis::sampling::sample;
use statlab::analysis::{DatasetReport, DiscreteDistribution, DistributionParams, DistributionType};
use statlab::config::Settings;
use statlab::file::{DatasetFileHandler, FileHandler, SettingsFileHandler};

use crate::input;
use crate::ui::{self, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "statlab", version, about = "Distribution functions, histograms and sample statistics")]
pub struct Cli {
    /// Settings file (RON); defaults to <config dir>/statlab/settings.ron
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// PDF, CDF, mean and variance at one point
    Eval {
        #[arg(long, default_value_t = DistributionType::Normal)]
        dist: DistributionType,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// PDF/CDF sampled over the distribution's plot window
    Curve {
        #[arg(long, default_value_t = DistributionType::Normal)]
        dist: DistributionType,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Probability mass of a discrete distribution at k
    Discrete {
        #[arg(long, value_enum)]
        dist: DiscreteKind,
        #[arg(long)]
        k: u64,
        #[arg(long, default_value_t = 10)]
        trials: u64,
        #[arg(long, default_value_t = 0.5)]
        p: f64,
        #[arg(long, default_value_t = 1)]
        successes: u64,
        #[arg(long, default_value_t = 1.0)]
        lambda: f64,
    },
    /// Statistics and histogram of one CSV column
    Histogram {
        path: PathBuf,
        #[arg(long)]
        column: String,
        #[arg(long)]
        group_column: Option<String>,
        /// Only this group (uses the grouped binning policy)
        #[arg(long, requires = "group_column")]
        group: Option<String>,
        /// One histogram per group
        #[arg(long, requires = "group_column", conflicts_with = "group")]
        all_groups: bool,
    },
    /// Draw samples from a distribution and bin them
    Simulate {
        #[arg(long, default_value_t = DistributionType::Normal)]
        dist: DistributionType,
        #[arg(long, default_value_t = 1000)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Pick a distribution and enter its parameters at the prompt
    Interactive,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DiscreteKind {
    Binomial,
    Geometric,
    NegativeBinomial,
    Poisson,
}

/// Parameter overrides; anything left out comes from the settings.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub mean: Option<f64>,
    #[arg(long)]
    pub std_dev: Option<f64>,
    #[arg(long)]
    pub rate: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub lower: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub upper: Option<f64>,
    #[arg(long)]
    pub shape: Option<f64>,
    #[arg(long)]
    pub scale: Option<f64>,
}

impl ParamArgs {
    pub fn apply(&self, defaults: DistributionParams) -> DistributionParams {
        DistributionParams {
            mean: self.mean.unwrap_or(defaults.mean),
            std_dev: self.std_dev.unwrap_or(defaults.std_dev),
            rate: self.rate.unwrap_or(defaults.rate),
            lower: self.lower.unwrap_or(defaults.lower),
            upper: self.upper.unwrap_or(defaults.upper),
            shape: self.shape.unwrap_or(defaults.shape),
            scale: self.scale.unwrap_or(defaults.scale),
        }
    }
}

pub struct StatlabApp {
    settings: Settings,
    format: OutputFormat,
}

impl StatlabApp {
    pub fn new(cli: &Cli) -> Result<Self> {
        let settings = SettingsFileHandler::new().load_layered(cli.config.as_deref())?;
        Ok(Self {
            settings,
            format: cli.format,
        })
    }

    pub fn run(&self, command: Command) -> Result<()> {
        let mut out = io::stdout().lock();
        let format = self.format;

        match command {
            Command::Eval { dist, x, params } => {
                let distribution = dist.resolve(&params.apply(self.settings.defaults))?;
                let result = distribution.evaluate(x)?;
                ui::distribution::write_evaluation(&mut out, format, &distribution, x, &result)
            }
            Command::Curve { dist, params } => {
                let params = params.apply(self.settings.defaults);
                let distribution = dist.resolve(&params)?;
                let curve = dist.curve(&params)?;
                ui::distribution::write_curve(&mut out, format, &distribution, &curve)
            }
            Command::Discrete { dist, k, trials, p, successes, lambda } => {
                let distribution = match dist {
                    DiscreteKind::Binomial => DiscreteDistribution::binomial(trials, p)?,
                    DiscreteKind::Geometric => DiscreteDistribution::geometric(p)?,
                    DiscreteKind::NegativeBinomial => DiscreteDistribution::negative_binomial(successes, p)?,
                    DiscreteKind::Poisson => DiscreteDistribution::poisson(lambda)?,
                };
                let result = distribution.evaluate(k)?;
                ui::distribution::write_discrete(&mut out, format, &distribution, k, &result)
            }
            Command::Histogram { path, column, group_column, group, all_groups } => {
                let mut handler = DatasetFileHandler::new(column);
                if let Some(group_column) = group_column {
                    handler = handler.with_group_column(group_column);
                }
                let dataset = handler.load(&path)?;
                info!(rows = dataset.len(), path = %path.display(), "dataset loaded");

                let grouped = self.settings.policy_for(true);
                let reports = if let Some(group) = group {
                    vec![dataset.group_report(&group, grouped, self.settings.overlay)?]
                } else if all_groups {
                    dataset
                        .groups()
                        .iter()
                        .map(|g| dataset.group_report(g, grouped, self.settings.overlay))
                        .collect::<statlab::Result<Vec<_>>>()?
                } else {
                    vec![dataset.report(self.settings.policy_for(false), self.settings.overlay)?]
                };
                ui::histogram::write_reports(&mut out, format, &reports)
            }
            Command::Simulate { dist, count, seed, params } => {
                let distribution = dist.resolve(&params.apply(self.settings.defaults))?;
                let samples = sample(&distribution, count, seed.or(self.settings.seed))?;
                let report = DatasetReport::build(
                    distribution.to_string(),
                    &samples,
                    self.settings.policy_for(false),
                    self.settings.overlay,
                )?;
                ui::histogram::write_simulation(&mut out, format, &distribution, &report)
            }
            Command::Interactive => {
                let form = input::prompt_distribution(&self.settings.defaults)
                    .context("Interactive input aborted")?;
                let distribution = form.dist_type.resolve(&form.params)?;
                let result = distribution.evaluate(form.x)?;
                ui::distribution::write_evaluation(&mut out, format, &distribution, form.x, &result)?;
                if form.show_curve {
                    let curve = form.dist_type.curve(&form.params)?;
                    ui::distribution::write_curve(&mut out, format, &distribution, &curve)?;
                }
                Ok(())
            }
        }
    }
}
