//! `mlprobe activation`: SELU over a fixed range on the selected backend

use anyhow::{Context, Result};
use mlprobe_checks::ActivationCheck;
use mlprobe_common::ProbeConfig;
use mlprobe_device_probe::select_device;
use mlprobe_kernels::CandleBackend;

use super::run_check;
use crate::output::OutputConfig;

pub fn execute(config: &ProbeConfig, output: &OutputConfig) -> Result<i32> {
    let device = select_device(config.device.prefer, config.device.ordinal)?;
    let backend = CandleBackend::new(device).context("failed to open backend")?;
    let check = ActivationCheck::new(backend, &config.activation);
    run_check(&check, output, &config.policy)
}
