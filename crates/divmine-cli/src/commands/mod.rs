//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod profiles;

use std::path::{Path, PathBuf};

use divmine_core::DivmineConfig;
use tracing::debug;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("divmine")
        .join("config.json")
}

/// Load the explicit config file, else the default one, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DivmineConfig> {
    if let Some(path) = config_path {
        return Ok(DivmineConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return Ok(DivmineConfig::from_file(&default_path)?);
    }

    Ok(DivmineConfig::default())
}
