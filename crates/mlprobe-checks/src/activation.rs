//! Activation check: framework version, backend, and SELU over `0..n`.

use std::fmt;

use mlprobe_common::{ActivationCheckConfig, FrameworkInfo, Result};
use mlprobe_kernels::{SeluParams, TensorBackend};
use serde::Serialize;
use tracing::info;

use crate::{CheckReport, SmokeCheck};

pub struct ActivationCheck<B> {
    backend: B,
    params: SeluParams,
    range_end: usize,
}

impl<B: TensorBackend> ActivationCheck<B> {
    pub fn new(backend: B, config: &ActivationCheckConfig) -> Self {
        Self {
            backend,
            params: SeluParams::new(config.alpha, config.lambda),
            range_end: config.range_end,
        }
    }
}

impl<B: TensorBackend> SmokeCheck for ActivationCheck<B> {
    type Report = ActivationReport;

    fn name(&self) -> &'static str {
        "activation"
    }

    fn run(&self) -> Result<ActivationReport> {
        let framework = self.backend.framework();
        let backend = self.backend.device().platform().to_string();
        let input = self.backend.arange(self.range_end)?;
        let output = self.backend.selu(&input, self.params)?;
        info!(%backend, len = output.len(), "evaluated selu");
        Ok(ActivationReport {
            framework,
            backend,
            alpha: self.params.alpha,
            lambda: self.params.lambda,
            input,
            output,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivationReport {
    pub framework: FrameworkInfo,
    pub backend: String,
    pub alpha: f32,
    pub lambda: f32,
    pub input: Vec<f32>,
    pub output: Vec<f32>,
}

impl CheckReport for ActivationReport {}

impl fmt::Display for ActivationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version:  {}", self.framework.version)?;
        writeln!(f, "Backend:  {}", self.backend)?;
        writeln!(f, "Hello, world:  {:?}", self.output)?;
        // Closing blank line pair.
        write!(f, "\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlprobe_kernels::CandleBackend;

    #[test]
    fn default_range_matches_reference_values() {
        let check = ActivationCheck::new(CandleBackend::cpu(), &ActivationCheckConfig::default());
        let report = check.run().unwrap();
        assert_eq!(report.input, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(report.backend, "cpu");
        let expected = [0.0, 1.05, 2.1, 3.15, 4.2];
        for (actual, expected) in report.output.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-5, "{actual} vs {expected}");
        }
    }

    #[test]
    fn output_is_non_decreasing() {
        let config = ActivationCheckConfig { range_end: 32, ..ActivationCheckConfig::default() };
        let report = ActivationCheck::new(CandleBackend::cpu(), &config).run().unwrap();
        assert!(report.output.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn text_report_lines() {
        let check = ActivationCheck::new(CandleBackend::cpu(), &ActivationCheckConfig::default());
        let text = check.run().unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Version:  "));
        assert!(lines[0].len() > "Version:  ".len());
        assert_eq!(lines[1], "Backend:  cpu");
        assert!(lines[2].starts_with("Hello, world:  [0.0, "));
        assert!(text.ends_with("]\n\n\n"));
        assert_eq!(lines.len(), 5);
    }
}
