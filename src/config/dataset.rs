// src/config/dataset.rs
use serde::{Serialize, Deserialize};
use std::collections::BTreeSet;

use crate::analysis::{BinningPolicy, DatasetReport};

/// One recorded value, e.g. the sixes a team hit in one innings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub value: f64,
    pub group: Option<String>,
    pub label: Option<String>,
}

impl Observation {
    pub fn new(value: f64) -> Self {
        Self { value, group: None, label: None }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            observations: Vec::new(),
        }
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Distinct group names in sorted order.
    pub fn groups(&self) -> Vec<String> {
        self.observations
            .iter()
            .filter_map(|o| o.group.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn group_values(&self, group: &str) -> Vec<f64> {
        self.observations
            .iter()
            .filter(|o| o.group.as_deref() == Some(group))
            .map(|o| o.value)
            .collect()
    }

    pub fn report(&self, policy: &BinningPolicy, overlay: bool) -> crate::Result<DatasetReport> {
        DatasetReport::build(self.name.clone(), &self.values(), policy, overlay)
    }

    pub fn group_report(&self, group: &str, policy: &BinningPolicy, overlay: bool) -> crate::Result<DatasetReport> {
        DatasetReport::build(format!("{} / {}", self.name, group), &self.group_values(group), policy, overlay)
    }
}
