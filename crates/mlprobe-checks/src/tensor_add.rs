//! Tensor addition check.
//!
//! Selects a device, adds a scalar to a literal tensor and requires the exact
//! expected result. Unlike the other checks, any failure here, device
//! selection included, is caught and recorded in the report as
//! [`CheckOutcome::Failed`].

use std::fmt;

use mlprobe_common::{FrameworkInfo, ProbeError, Result, TensorCheckConfig};
use mlprobe_device_probe::DeviceRequest;
use mlprobe_kernels::TensorBackend;
use serde::Serialize;
use tracing::{info, warn};

use crate::{CheckOutcome, CheckReport, SmokeCheck};

pub const MISMATCH_MESSAGE: &str = "Tensors are not equal";

pub struct TensorAddCheck<B> {
    backend: B,
    request: DeviceRequest,
    input: Vec<f32>,
    scalar: f32,
    expected: Vec<f32>,
}

impl<B: TensorBackend> TensorAddCheck<B> {
    /// The device resolved from `request` is only reported; the arithmetic
    /// runs wherever `backend` lives.
    pub fn new(backend: B, request: DeviceRequest, config: &TensorCheckConfig) -> Self {
        Self {
            backend,
            request,
            input: config.input.clone(),
            scalar: config.scalar,
            expected: config.expected.clone(),
        }
    }

    fn verify(&self) -> Result<Vec<f32>> {
        let result = self.backend.add_scalar(&self.input, self.scalar)?;
        // Exact comparison, shape included.
        if result != self.expected {
            return Err(ProbeError::TensorMismatch(MISMATCH_MESSAGE.to_string()));
        }
        Ok(result)
    }
}

impl<B: TensorBackend> SmokeCheck for TensorAddCheck<B> {
    type Report = TensorAddReport;

    fn name(&self) -> &'static str {
        "tensor"
    }

    fn run(&self) -> Result<TensorAddReport> {
        let framework = self.backend.framework();
        let mut device = None;
        let attempt = self.request.resolve().and_then(|selected| {
            device = Some(selected.to_string());
            self.verify()
        });
        let (result, outcome) = match attempt {
            Ok(result) => {
                info!(device = device.as_deref().unwrap_or("none"), "tensor addition verified");
                (Some(result), CheckOutcome::Passed)
            }
            Err(err) => {
                warn!(error = %err, "tensor addition check failed");
                (None, CheckOutcome::Failed { message: err.to_string() })
            }
        };
        Ok(TensorAddReport {
            framework,
            device,
            original: self.input.clone(),
            scalar: self.scalar,
            result,
            outcome,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TensorAddReport {
    pub framework: FrameworkInfo,
    /// `None` when no device could be selected.
    pub device: Option<String>,
    pub original: Vec<f32>,
    pub scalar: f32,
    pub result: Option<Vec<f32>>,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl CheckReport for TensorAddReport {
    fn outcome(&self) -> CheckOutcome {
        self.outcome.clone()
    }
}

impl fmt::Display for TensorAddReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version:  {}", self.framework.version)?;
        if let Some(device) = &self.device {
            writeln!(f, "Using device: {device}")?;
        }
        match (&self.outcome, &self.result) {
            (CheckOutcome::Passed, Some(result)) => {
                writeln!(f, "Hello, World:")?;
                writeln!(f, "   Original tensor: {:?}", self.original)?;
                writeln!(f, "   After adding {}: {:?}", self.scalar, result)?;
                writeln!(f, "   {} is working correctly!", self.framework.name)
            }
            (CheckOutcome::Failed { message }, _) => writeln!(f, "An error occurred: {message}"),
            (CheckOutcome::Passed, None) => Ok(()),
        }
    }
}
