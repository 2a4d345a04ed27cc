//! `mlprobe config`: inspect the effective configuration

use anyhow::{Context, Result};
use clap::Subcommand;
use mlprobe_common::ProbeConfig;

use crate::config::default_config_path;
use crate::output::{OutputConfig, OutputFormat};

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration after files, environment, and flags
    Show,
    /// Print the default configuration file path
    Path,
}

pub fn execute(action: ConfigAction, config: &ProbeConfig, output: &OutputConfig) -> Result<()> {
    match action {
        ConfigAction::Show if output.format == OutputFormat::Json => output.json(config)?,
        ConfigAction::Show => {
            let text = config.to_toml().context("failed to serialize configuration")?;
            println!("{text}");
        }
        ConfigAction::Path => println!("{}", default_config_path().display()),
    }
    Ok(())
}
