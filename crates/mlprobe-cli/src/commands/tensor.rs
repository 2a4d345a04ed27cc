//! `mlprobe tensor`: scalar addition on a literal tensor

use anyhow::Result;
use mlprobe_checks::TensorAddCheck;
use mlprobe_common::ProbeConfig;
use mlprobe_device_probe::DeviceRequest;
use mlprobe_kernels::CandleBackend;

use super::run_check;
use crate::output::OutputConfig;

/// The device is selected inside the check and only reported; the tensors
/// stay on the CPU. A selection failure is a failed check, not an error.
pub fn execute(config: &ProbeConfig, output: &OutputConfig) -> Result<i32> {
    let request = DeviceRequest::detect(config.device.prefer, config.device.ordinal);
    let check = TensorAddCheck::new(CandleBackend::cpu(), request, &config.tensor);
    run_check(&check, output, &config.policy)
}
