// src/file/settings.rs
use super::FileHandler;
use crate::config::Settings;
use anyhow::{Result, Context};
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

const ENV_PREFIX: &str = "STATLAB";

#[derive(Debug, Default)]
pub struct SettingsFileHandler;

impl SettingsFileHandler {
    pub fn new() -> Self {
        Self
    }

    /// `<config dir>/statlab/settings.ron`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("statlab").join("settings.ron"))
    }

    /// Defaults, then the RON file, then `STATLAB__*` environment variables.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load_layered(&self, path: Option<&Path>) -> Result<Settings> {
        let (file, required) = match path {
            Some(path) => (Some(path.to_path_buf()), true),
            None => (Self::default_path(), false),
        };

        let mut builder = Config::builder();
        if let Some(file) = &file {
            debug!(path = %file.display(), required, "reading settings");
            builder = builder.add_source(
                File::from(file.as_path())
                    .format(FileFormat::Ron)
                    .required(required),
            );
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")?;
        settings.validate().context("Invalid binning settings")?;
        Ok(settings)
    }
}

impl FileHandler<Settings> for SettingsFileHandler {
    fn load(&self, path: &Path) -> Result<Settings> {
        self.load_layered(Some(path))
            .with_context(|| format!("Failed to load settings from {}", path.display()))
    }
}
