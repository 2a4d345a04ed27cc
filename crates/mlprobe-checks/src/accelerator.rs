//! Accelerator check: random input on the device through a native kernel.

use std::fmt;

use mlprobe_common::{ProbeError, Result};
use mlprobe_kernels::{AcceleratorKernel, TensorBackend};
use serde::Serialize;
use tracing::info;

use crate::{CheckReport, SmokeCheck};

pub struct AcceleratorCheck<B, K> {
    backend: B,
    kernel: K,
    length: usize,
    seed: Option<u64>,
}

impl<B: TensorBackend, K: AcceleratorKernel> AcceleratorCheck<B, K> {
    pub fn new(backend: B, kernel: K, length: usize, seed: Option<u64>) -> Self {
        Self { backend, kernel, length, seed }
    }
}

impl<B: TensorBackend, K: AcceleratorKernel> SmokeCheck for AcceleratorCheck<B, K> {
    type Report = AcceleratorReport;

    fn name(&self) -> &'static str {
        "accelerator"
    }

    fn run(&self) -> Result<AcceleratorReport> {
        let device = self.backend.device();
        let input = self.backend.random_normal(self.length, self.seed)?;
        let output = self.kernel.launch(&input)?;
        if output.len() != input.len() {
            return Err(ProbeError::ShapeMismatch { expected: input.len(), actual: output.len() });
        }
        info!(kernel = self.kernel.name(), %device, len = output.len(), "kernel launched");
        Ok(AcceleratorReport {
            kernel: self.kernel.name().to_string(),
            device: device.to_string(),
            input,
            output,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AcceleratorReport {
    pub kernel: String,
    pub device: String,
    pub input: Vec<f32>,
    pub output: Vec<f32>,
}

impl CheckReport for AcceleratorReport {}

impl fmt::Display for AcceleratorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input_tensor: {:?} (device={})", self.input, self.device)?;
        writeln!(f, "output_tensor: {:?} (device={})", self.output, self.device)
    }
}
