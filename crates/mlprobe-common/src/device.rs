//! Compute devices and framework metadata

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ProbeError, Result};

/// A concrete compute target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    Cuda(usize),
}

impl Device {
    /// Backend platform name, without the ordinal.
    pub const fn platform(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda(_) => "cuda",
        }
    }

    pub const fn is_accelerator(&self) -> bool {
        matches!(self, Self::Cuda(_))
    }

    /// Open the matching candle device.
    ///
    /// Fails with [`ProbeError::DeviceUnavailable`] when CUDA support is not
    /// compiled in or the driver refuses the ordinal.
    pub fn to_candle(&self) -> Result<candle_core::Device> {
        match self {
            Self::Cpu => Ok(candle_core::Device::Cpu),
            Self::Cuda(ordinal) => candle_core::Device::new_cuda(*ordinal)
                .map_err(|e| ProbeError::DeviceUnavailable(format!("cuda:{ordinal}: {e}"))),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
        }
    }
}

/// Which device the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    /// Accelerator if one is present, else CPU.
    #[default]
    Auto,
    Cpu,
    Cuda,
}

impl FromStr for DevicePreference {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "cpu" => Ok(Self::Cpu),
            "cuda" | "gpu" => Ok(Self::Cuda),
            other => Err(ProbeError::Config(format!(
                "unknown device '{other}'. Expected one of: auto, cpu, cuda"
            ))),
        }
    }
}

impl fmt::Display for DevicePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda => write!(f, "cuda"),
        }
    }
}

/// Name and version of the tensor framework under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkInfo {
    pub name: String,
    pub version: String,
}

impl FrameworkInfo {
    /// Build framework metadata; an empty version is reported as `unknown`.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let version = version.into();
        let version = if version.trim().is_empty() { "unknown".to_string() } else { version };
        Self { name: name.into(), version }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_display_includes_ordinal() {
        assert_eq!(Device::Cpu.to_string(), "cpu");
        assert_eq!(Device::Cuda(1).to_string(), "cuda:1");
        assert_eq!(Device::Cuda(1).platform(), "cuda");
    }

    #[test]
    fn cpu_converts_to_candle() {
        assert!(Device::Cpu.to_candle().unwrap().is_cpu());
        assert!(!Device::Cpu.is_accelerator());
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn cuda_without_feature_is_unavailable() {
        let err = Device::Cuda(0).to_candle().unwrap_err();
        assert!(matches!(err, ProbeError::DeviceUnavailable(_)));
    }

    #[test]
    fn preference_parsing_accepts_aliases() {
        assert_eq!("AUTO".parse::<DevicePreference>().unwrap(), DevicePreference::Auto);
        assert_eq!(" gpu ".parse::<DevicePreference>().unwrap(), DevicePreference::Cuda);
        assert_eq!("cpu".parse::<DevicePreference>().unwrap(), DevicePreference::Cpu);
        assert!("tpu".parse::<DevicePreference>().is_err());
    }

    #[test]
    fn framework_version_never_empty() {
        assert_eq!(FrameworkInfo::new("candle", "").version, "unknown");
        assert_eq!(FrameworkInfo::new("candle", "0.9.1").version, "0.9.1");
    }
}
