//! Device detection and selection for mlprobe.
//!
//! The checks ask for a device through a [`DeviceRequest`]: the user's
//! preference plus whether an accelerator could actually be opened. Host CPU
//! details are gathered separately for `mlprobe info`.

use std::fmt;

use mlprobe_common::{Device, DevicePreference, ProbeError, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Set to `1` or `true` to treat every accelerator as absent.
pub const DISABLE_GPU_ENV: &str = "MLPROBE_DISABLE_GPU";

// ── Host CPU ─────────────────────────────────────────────────────────────────

/// Widest SIMD instruction set usable on this CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimdLevel {
    Scalar,
    Sse42,
    Avx2,
    Avx512,
    Neon,
}

impl SimdLevel {
    pub fn detect() -> Self {
        CpuCapabilities::detect().simd
    }
}

impl fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Sse42 => "sse4.2",
            Self::Avx2 => "avx2",
            Self::Avx512 => "avx512",
            Self::Neon => "neon",
        })
    }
}

/// What the host CPU offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuCapabilities {
    pub cores: usize,
    /// Detected instruction-set extensions, narrowest first.
    pub features: Vec<&'static str>,
    pub simd: SimdLevel,
}

impl CpuCapabilities {
    pub fn detect() -> Self {
        let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
        let features = host_features();

        let simd = [
            ("avx512f", SimdLevel::Avx512),
            ("avx2", SimdLevel::Avx2),
            ("sse4.2", SimdLevel::Sse42),
            ("neon", SimdLevel::Neon),
        ]
        .into_iter()
        .find(|(name, _)| features.contains(name))
        .map_or(SimdLevel::Scalar, |(_, level)| level);

        Self { cores, features, simd }
    }

    pub fn has(&self, feature: &str) -> bool {
        self.features.contains(&feature)
    }
}

#[cfg(target_arch = "x86_64")]
fn host_features() -> Vec<&'static str> {
    let detected = [
        ("sse4.2", std::arch::is_x86_feature_detected!("sse4.2")),
        ("avx2", std::arch::is_x86_feature_detected!("avx2")),
        ("avx512f", std::arch::is_x86_feature_detected!("avx512f")),
    ];
    detected.into_iter().filter_map(|(name, on)| on.then_some(name)).collect()
}

#[cfg(target_arch = "aarch64")]
fn host_features() -> Vec<&'static str> {
    vec!["neon"]
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn host_features() -> Vec<&'static str> {
    Vec::new()
}

// ── Accelerators ─────────────────────────────────────────────────────────────

/// Whether this build can drive CUDA devices at all.
pub const fn cuda_compiled() -> bool {
    cfg!(feature = "cuda")
}

fn gpu_disabled() -> bool {
    std::env::var(DISABLE_GPU_ENV)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Try to open CUDA device `ordinal`.
///
/// Always `false` without the `cuda` feature or when
/// [`DISABLE_GPU_ENV`] is set.
pub fn cuda_available(ordinal: usize) -> bool {
    if gpu_disabled() {
        debug!("accelerators disabled by {DISABLE_GPU_ENV}");
        return false;
    }
    if !cuda_compiled() {
        return false;
    }
    match candle_core::Device::new_cuda(ordinal) {
        Ok(_) => true,
        Err(e) => {
            debug!(ordinal, error = %e, "cuda device did not open");
            false
        }
    }
}

/// Snapshot shown by `mlprobe info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceCapabilities {
    pub cpu: CpuCapabilities,
    pub cuda_compiled: bool,
    pub cuda_available: bool,
}

impl DeviceCapabilities {
    pub fn detect() -> Self {
        Self {
            cpu: CpuCapabilities::detect(),
            cuda_compiled: cuda_compiled(),
            cuda_available: cuda_available(0),
        }
    }
}

// ── Selection ────────────────────────────────────────────────────────────────

/// A device preference paired with what the host can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceRequest {
    pub preference: DevicePreference,
    pub ordinal: usize,
    pub gpu_available: bool,
}

impl DeviceRequest {
    /// Look for an accelerator unless the CPU was asked for explicitly.
    pub fn detect(preference: DevicePreference, ordinal: usize) -> Self {
        let gpu_available = preference != DevicePreference::Cpu && cuda_available(ordinal);
        Self { preference, ordinal, gpu_available }
    }

    /// `Auto` prefers `Cuda(ordinal)` and falls back to the CPU; an explicit
    /// `Cuda` without an accelerator is an error.
    pub fn resolve(&self) -> Result<Device> {
        let device = match self.preference {
            DevicePreference::Cpu => Device::Cpu,
            DevicePreference::Auto | DevicePreference::Cuda if self.gpu_available => {
                Device::Cuda(self.ordinal)
            }
            DevicePreference::Auto => Device::Cpu,
            DevicePreference::Cuda => {
                let reason = if cuda_compiled() {
                    format!("cuda:{} could not be opened", self.ordinal)
                } else {
                    "built without CUDA support (enable the `cuda` feature)".to_string()
                };
                return Err(ProbeError::DeviceUnavailable(reason));
            }
        };
        info!(preference = %self.preference, %device, "selected device");
        Ok(device)
    }
}

/// Detect and resolve in one step.
pub fn select_device(preference: DevicePreference, ordinal: usize) -> Result<Device> {
    DeviceRequest::detect(preference, ordinal).resolve()
}
