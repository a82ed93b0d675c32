// src/file/mod.rs
use anyhow::Result;
use std::path::Path;

pub mod dataset;
pub mod settings;

pub use dataset::DatasetFileHandler;
pub use settings::SettingsFileHandler;

// Core trait for reading inputs; nothing is written back.
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
}
