// src/input/distribution.rs
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use statlab::analysis::{DistributionParams, DistributionType};

/// What the user entered at the prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionForm {
    pub dist_type: DistributionType,
    pub params: DistributionParams,
    pub x: f64,
    pub show_curve: bool,
}

/// One editable parameter of a distribution type.
struct ParamField {
    prompt: &'static str,
    get: fn(&DistributionParams) -> f64,
    set: fn(&mut DistributionParams, f64),
    positive: bool,
}

const MEAN: ParamField = ParamField {
    prompt: "Mean (μ)",
    get: |p| p.mean,
    set: |p, v| p.mean = v,
    positive: false,
};
const STD_DEV: ParamField = ParamField {
    prompt: "Standard deviation (σ)",
    get: |p| p.std_dev,
    set: |p, v| p.std_dev = v,
    positive: true,
};
const RATE: ParamField = ParamField {
    prompt: "Rate (λ)",
    get: |p| p.rate,
    set: |p, v| p.rate = v,
    positive: true,
};
const LOWER: ParamField = ParamField {
    prompt: "Lower bound (a)",
    get: |p| p.lower,
    set: |p, v| p.lower = v,
    positive: false,
};
const UPPER: ParamField = ParamField {
    prompt: "Upper bound (b)",
    get: |p| p.upper,
    set: |p, v| p.upper = v,
    positive: false,
};
const SHAPE: ParamField = ParamField {
    prompt: "Shape (k)",
    get: |p| p.shape,
    set: |p, v| p.shape = v,
    positive: true,
};
const SCALE: ParamField = ParamField {
    prompt: "Scale (θ)",
    get: |p| p.scale,
    set: |p, v| p.scale = v,
    positive: true,
};

fn fields_for(dist_type: DistributionType) -> &'static [ParamField] {
    match dist_type {
        DistributionType::Normal => &[MEAN, STD_DEV],
        DistributionType::Exponential => &[RATE],
        DistributionType::Uniform => &[LOWER, UPPER],
        DistributionType::Gamma => &[SHAPE, SCALE],
        DistributionType::StandardNormal
        | DistributionType::StandardExponential
        | DistributionType::StandardUniform => &[],
    }
}

pub fn prompt_distribution(defaults: &DistributionParams) -> Result<DistributionForm> {
    let theme = ColorfulTheme::default();

    let labels: Vec<&str> = DistributionType::ALL.iter().map(|t| t.label()).collect();
    let selected = Select::with_theme(&theme)
        .with_prompt("Distribution")
        .items(&labels)
        .default(0)
        .interact()?;
    let dist_type = DistributionType::ALL[selected];

    let mut params = *defaults;
    for field in fields_for(dist_type) {
        let input = Input::<f64>::with_theme(&theme)
            .with_prompt(field.prompt)
            .default((field.get)(&params));
        let value = if field.positive {
            input
                .validate_with(|v: &f64| -> Result<(), &'static str> {
                    if v.is_finite() && *v > 0.0 {
                        Ok(())
                    } else {
                        Err("must be greater than zero")
                    }
                })
                .interact_text()?
        } else {
            input
                .validate_with(|v: &f64| -> Result<(), &'static str> {
                    if v.is_finite() {
                        Ok(())
                    } else {
                        Err("must be a finite number")
                    }
                })
                .interact_text()?
        };
        (field.set)(&mut params, value);
    }

    let x = Input::<f64>::with_theme(&theme)
        .with_prompt("Evaluate at x")
        .default(0.0)
        .interact_text()?;

    let show_curve = Confirm::with_theme(&theme)
        .with_prompt("Print the curve as well?")
        .default(false)
        .interact()?;

    Ok(DistributionForm {
        dist_type,
        params,
        x,
        show_curve,
    })
}
