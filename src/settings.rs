use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Batch settings: defaults, then `laptop_specs.toml` if present, then
/// `LAPTOP_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub chunk_size: usize,
    pub parallel: bool,
    pub progress: bool,
    pub db_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            chunk_size: 500,
            parallel: true,
            progress: true,
            db_path: PathBuf::from("data/laptops.sqlite"),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("laptop_specs").required(false))
                .add_source(Environment::with_prefix("LAPTOP")),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let d = Settings::default();
        builder
            .set_default("chunk_size", d.chunk_size as i64)?
            .set_default("parallel", d.parallel)?
            .set_default("progress", d.progress)?
            .set_default("db_path", d.db_path.to_string_lossy().into_owned())?
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}
