//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod rules;

use std::path::PathBuf;

use crumb_core::models::CrumbConfig;

/// Default configuration file location.
pub(crate) fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crumb")
        .join("config.json")
}

/// Resolve configuration: an explicit `--config` path, else the default
/// location when present, else built-in defaults.
pub(crate) fn load_config(path: Option<&str>) -> anyhow::Result<CrumbConfig> {
    if let Some(path) = path {
        return Ok(CrumbConfig::from_file(std::path::Path::new(path))?);
    }

    let default = default_config_path();
    if default.exists() {
        return Ok(CrumbConfig::from_file(&default)?);
    }

    Ok(CrumbConfig::default())
}
