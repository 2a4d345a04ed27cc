//! Configuration loading for the CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mlprobe_common::ProbeConfig;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "mlprobe.toml";

/// `<user config dir>/mlprobe/mlprobe.toml`, or `mlprobe.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("mlprobe").join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Defaults, then the config file, then `MLPROBE_*` environment variables.
///
/// An explicit `path` must exist; the default path is optional.
pub fn load(path: Option<&Path>) -> Result<ProbeConfig> {
    let mut config = match path {
        Some(path) => ProbeConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => {
            let default = default_config_path();
            if default.is_file() {
                ProbeConfig::from_file(&default).with_context(|| {
                    format!("failed to load configuration from {}", default.display())
                })?
            } else {
                debug!("no configuration file, using defaults");
                ProbeConfig::default()
            }
        }
    };
    config.apply_env_overrides().context("invalid MLPROBE_* environment variable")?;
    Ok(config)
}
