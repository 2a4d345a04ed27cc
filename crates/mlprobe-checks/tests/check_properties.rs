//! End-to-end properties of the smoke checks on the CPU backend.

use mlprobe_common::{ActivationCheckConfig, DevicePreference, TensorCheckConfig};
use mlprobe_checks::{
    AcceleratorCheck, ActivationCheck, CheckOutcome, CheckReport, SmokeCheck, TensorAddCheck,
};
use mlprobe_device_probe::DeviceRequest;
use mlprobe_kernels::{AcceleratorKernel, CandleBackend};
use proptest::prelude::*;

struct Negate;

impl AcceleratorKernel for Negate {
    fn name(&self) -> &str {
        "negate"
    }
    fn launch(&self, input: &[f32]) -> mlprobe_common::Result<Vec<f32>> {
        Ok(input.iter().map(|x| -x).collect())
    }
}

fn on_cpu() -> DeviceRequest {
    DeviceRequest::detect(DevicePreference::Cpu, 0)
}

#[test]
fn every_check_reports_a_version() {
    let tensor = TensorAddCheck::new(CandleBackend::cpu(), on_cpu(), &Default::default())
        .run()
        .unwrap();
    let activation =
        ActivationCheck::new(CandleBackend::cpu(), &Default::default()).run().unwrap();
    assert!(!tensor.framework.version.is_empty());
    assert!(!activation.framework.version.is_empty());
}

#[test]
fn propagating_checks_always_pass_when_they_return() {
    let report = AcceleratorCheck::new(CandleBackend::cpu(), Negate, 10, None).run().unwrap();
    assert_eq!(report.outcome(), CheckOutcome::Passed);
    assert_eq!(report.output.len(), 10);
}

#[test]
fn check_names_are_stable() {
    assert_eq!(
        TensorAddCheck::new(CandleBackend::cpu(), on_cpu(), &Default::default()).name(),
        "tensor"
    );
    assert_eq!(ActivationCheck::new(CandleBackend::cpu(), &Default::default()).name(), "activation");
    assert_eq!(AcceleratorCheck::new(CandleBackend::cpu(), Negate, 1, None).name(), "accelerator");
}

proptest! {
    #[test]
    fn integer_inputs_add_exactly(
        values in prop::collection::vec(-1000i32..1000, 1..16),
        scalar in -100i32..100,
    ) {
        let config = TensorCheckConfig {
            input: values.iter().map(|&v| v as f32).collect(),
            scalar: scalar as f32,
            expected: values.iter().map(|&v| (v + scalar) as f32).collect(),
        };
        let report = TensorAddCheck::new(CandleBackend::cpu(), on_cpu(), &config).run().unwrap();
        prop_assert!(report.outcome.passed());
    }

    #[test]
    fn wrong_expectation_is_reported(values in prop::collection::vec(-100i32..100, 1..8)) {
        let config = TensorCheckConfig {
            input: values.iter().map(|&v| v as f32).collect(),
            scalar: 1.0,
            expected: values.iter().map(|&v| (v + 2) as f32).collect(),
        };
        let report = TensorAddCheck::new(CandleBackend::cpu(), on_cpu(), &config).run().unwrap();
        prop_assert!(report.to_string().contains("An error occurred:"));
    }

    #[test]
    fn accelerator_preserves_length(len in 1usize..64, seed in any::<u64>()) {
        let report =
            AcceleratorCheck::new(CandleBackend::cpu(), Negate, len, Some(seed)).run().unwrap();
        prop_assert_eq!(report.input.len(), len);
        prop_assert_eq!(report.output.len(), len);
    }

    #[test]
    fn activation_range_is_non_decreasing(range_end in 1usize..40) {
        let config = ActivationCheckConfig { range_end, ..Default::default() };
        let report = ActivationCheck::new(CandleBackend::cpu(), &config).run().unwrap();
        prop_assert_eq!(report.output.len(), range_end);
        prop_assert!(report.output.windows(2).all(|w| w[0] <= w[1]));
    }
}
