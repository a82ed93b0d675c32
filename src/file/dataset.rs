// src/file/dataset.rs
use super::FileHandler;
use crate::config::{Dataset, Observation};
use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reads a CSV table into a `Dataset`, picking columns by header name.
#[derive(Debug, Clone)]
pub struct DatasetFileHandler {
    pub value_column: String,
    pub group_column: Option<String>,
    pub label_column: Option<String>,
}

impl DatasetFileHandler {
    pub fn new(value_column: impl Into<String>) -> Self {
        Self {
            value_column: value_column.into(),
            group_column: None,
            label_column: None,
        }
    }

    pub fn with_group_column(mut self, column: impl Into<String>) -> Self {
        self.group_column = Some(column.into());
        self
    }

    pub fn with_label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = Some(column.into());
        self
    }

    pub fn read<R: Read>(&self, name: &str, reader: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = reader.headers().context("Failed to read CSV header")?.clone();

        let value_idx = column_index(&headers, &self.value_column)?;
        let group_idx = self.group_column.as_deref().map(|c| column_index(&headers, c)).transpose()?;
        let label_idx = self.label_column.as_deref().map(|c| column_index(&headers, c)).transpose()?;

        let mut dataset = Dataset::new(name);
        for (i, record) in reader.records().enumerate() {
            // Line 1 is the header
            let line = i + 2;
            let record = record.with_context(|| format!("Failed to read CSV line {}", line))?;

            let field = record.get(value_idx).unwrap_or_default();
            let value: f64 = field
                .parse()
                .with_context(|| format!("Line {}: `{}` is not a number", line, field))?;
            if !value.is_finite() {
                bail!("Line {}: value `{}` is not finite", line, field);
            }

            let mut observation = Observation::new(value);
            if let Some(idx) = group_idx {
                observation.group = record.get(idx).filter(|g| !g.is_empty()).map(str::to_string);
            }
            if let Some(idx) = label_idx {
                observation.label = record.get(idx).filter(|l| !l.is_empty()).map(str::to_string);
            }
            dataset.push(observation);
        }

        debug!(name, rows = dataset.len(), "loaded dataset");
        Ok(dataset)
    }
}

impl FileHandler<Dataset> for DatasetFileHandler {
    fn load(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        self.read(&name, file)
            .with_context(|| format!("Failed to parse dataset {}", path.display()))
    }
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
    headers.iter().position(|h| h == column).ok_or_else(|| {
        let available: Vec<&str> = headers.iter().collect();
        anyhow!("Column `{}` not found (available: {})", column, available.join(", "))
    })
}
