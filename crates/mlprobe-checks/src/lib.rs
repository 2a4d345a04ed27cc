//! The mlprobe smoke checks.
//!
//! | Check | Verifies |
//! |-------|----------|
//! | [`TensorAddCheck`] | element-wise scalar addition matches a known answer |
//! | [`ActivationCheck`] | the framework evaluates SELU over a fixed range |
//! | [`AcceleratorCheck`] | a native extension kernel runs on device-allocated input |
//!
//! Every check reports through a serializable report whose `Display` impl is
//! the human-readable output.

use std::fmt::Display;

use mlprobe_common::Result;
use serde::Serialize;

pub mod accelerator;
pub mod activation;
pub mod tensor_add;

pub use accelerator::{AcceleratorCheck, AcceleratorReport};
pub use activation::{ActivationCheck, ActivationReport};
pub use tensor_add::{TensorAddCheck, TensorAddReport};

/// A single smoke check.
pub trait SmokeCheck {
    type Report: CheckReport;

    fn name(&self) -> &'static str;

    /// Run the check once. Errors are faults the check does not handle.
    fn run(&self) -> Result<Self::Report>;
}

/// Pass/fail result of a check that handles its own failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckOutcome {
    Passed,
    Failed { message: String },
}

impl CheckOutcome {
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Output of a [`SmokeCheck`].
pub trait CheckReport: Serialize + Display {
    /// Reports of checks that propagate their faults always pass.
    fn outcome(&self) -> CheckOutcome {
        CheckOutcome::Passed
    }
}
