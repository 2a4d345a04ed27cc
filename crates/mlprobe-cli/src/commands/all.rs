//! `mlprobe all`: every check in sequence

use anyhow::Result;
use mlprobe_common::ProbeConfig;
use tracing::warn;

use crate::exit::EXIT_SUCCESS;
use crate::output::OutputConfig;

/// Runs tensor, activation, then accelerator. The accelerator check is
/// skipped when the configured extension file does not exist. Returns the
/// first non-zero exit code.
pub fn execute(config: &ProbeConfig, output: &OutputConfig, allow_cpu: bool) -> Result<i32> {
    let mut codes = vec![super::tensor::execute(config, output)?];
    codes.push(super::activation::execute(config, output)?);

    let extension = &config.accelerator.extension;
    if extension.is_file() {
        codes.push(super::accelerator::execute(config, output, allow_cpu)?);
    } else {
        warn!(path = %extension.display(), "extension not found, skipping accelerator check");
    }

    Ok(codes.into_iter().find(|&code| code != EXIT_SUCCESS).unwrap_or(EXIT_SUCCESS))
}
