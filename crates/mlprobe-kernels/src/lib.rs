//! Compute seams for the mlprobe smoke checks
//!
//! [`TensorBackend`] abstracts the tensor framework under test and
//! [`AcceleratorKernel`] the externally supplied native kernel, so checks can
//! run against real hardware or against test doubles.

use mlprobe_common::{Device, FrameworkInfo, Result};

pub mod activations;
pub mod backend;
pub mod extension;

pub use activations::{SeluParams, selu, selu_slice};
pub use backend::{CANDLE_VERSION, CandleBackend};
pub use extension::NativeExtension;

/// Tensor framework operations exercised by the smoke checks.
///
/// Every operation runs on [`TensorBackend::device`] and returns its result
/// read back to host memory.
pub trait TensorBackend: Send + Sync {
    fn framework(&self) -> FrameworkInfo;
    fn device(&self) -> Device;
    /// Element-wise `input + scalar`.
    fn add_scalar(&self, input: &[f32], scalar: f32) -> Result<Vec<f32>>;
    /// Element-wise scaled exponential linear unit.
    fn selu(&self, input: &[f32], params: SeluParams) -> Result<Vec<f32>>;
    /// `[0, 1, ..., end - 1]`
    fn arange(&self, end: usize) -> Result<Vec<f32>>;
    /// `len` samples from N(0, 1) allocated on the device.
    fn random_normal(&self, len: usize, seed: Option<u64>) -> Result<Vec<f32>>;
}

/// An opaque one-input transformation supplied outside this workspace.
pub trait AcceleratorKernel {
    fn name(&self) -> &str;
    fn launch(&self, input: &[f32]) -> Result<Vec<f32>>;
}
