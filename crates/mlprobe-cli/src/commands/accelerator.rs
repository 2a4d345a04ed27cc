//! `mlprobe accelerator`: run a native extension kernel on device input

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mlprobe_checks::AcceleratorCheck;
use mlprobe_common::{DevicePreference, ProbeConfig};
use mlprobe_device_probe::select_device;
use mlprobe_kernels::{CandleBackend, NativeExtension};
use tracing::info;

use super::run_check;
use crate::output::OutputConfig;

/// Run a native extension kernel on random device-allocated input
#[derive(Debug, Default, Clone, Args)]
pub struct AcceleratorCommand {
    /// Path to the extension shared library
    #[arg(short, long, value_name = "PATH")]
    pub extension: Option<PathBuf>,

    /// Exported kernel symbol
    #[arg(long, value_name = "NAME")]
    pub symbol: Option<String>,

    /// Number of input elements
    #[arg(long, value_name = "N")]
    pub length: Option<usize>,

    /// Seed for the random input
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Fall back to the CPU when no accelerator is present
    #[arg(long)]
    pub allow_cpu: bool,
}

impl AcceleratorCommand {
    /// Fold command-line overrides into the loaded configuration.
    pub fn apply(&self, config: &mut ProbeConfig) {
        if let Some(path) = &self.extension {
            config.accelerator.extension = path.clone();
        }
        if let Some(symbol) = &self.symbol {
            config.accelerator.symbol = symbol.clone();
        }
        if let Some(length) = self.length {
            config.accelerator.length = length;
        }
        if self.seed.is_some() {
            config.accelerator.seed = self.seed;
        }
    }

    pub fn execute(&self, config: &ProbeConfig, output: &OutputConfig) -> Result<i32> {
        execute(config, output, self.allow_cpu)
    }
}

/// Unless `allow_cpu` is set, `auto` is narrowed to requiring an accelerator.
pub fn execute(config: &ProbeConfig, output: &OutputConfig, allow_cpu: bool) -> Result<i32> {
    let preference = match config.device.prefer {
        DevicePreference::Auto if !allow_cpu => DevicePreference::Cuda,
        other => other,
    };
    let device = select_device(preference, config.device.ordinal)?;
    let backend = CandleBackend::new(device).context("failed to open backend")?;

    let accel = &config.accelerator;
    let kernel = NativeExtension::load(&accel.extension, &accel.symbol)?;
    info!(path = %kernel.path().display(), "running accelerator check");

    let check = AcceleratorCheck::new(backend, kernel, accel.length, accel.seed);
    run_check(&check, output, &config.policy)
}
