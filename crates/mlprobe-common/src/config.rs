//! Probe configuration
//!
//! Values come from built-in defaults, an optional TOML or JSON file, and
//! `MLPROBE_*` environment variables, in that order of precedence.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DevicePreference, ProbeError, Result};

/// Main mlprobe configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub logging: LoggingConfig,
    pub device: DeviceConfig,
    pub tensor: TensorCheckConfig,
    pub activation: ActivationCheckConfig,
    pub accelerator: AcceleratorCheckConfig,
    pub policy: PolicyConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `compact`, `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "compact".to_string() }
    }
}

/// Device selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub prefer: DevicePreference,
    pub ordinal: usize,
}

/// Inputs of the tensor addition check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TensorCheckConfig {
    pub input: Vec<f32>,
    pub scalar: f32,
    pub expected: Vec<f32>,
}

impl Default for TensorCheckConfig {
    fn default() -> Self {
        Self { input: vec![1.0, 2.0, 3.0], scalar: 1.0, expected: vec![2.0, 3.0, 4.0] }
    }
}

/// Parameters of the activation check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationCheckConfig {
    pub alpha: f32,
    pub lambda: f32,
    /// The activation is evaluated over `0..range_end`.
    pub range_end: usize,
}

impl Default for ActivationCheckConfig {
    fn default() -> Self {
        Self { alpha: 1.67, lambda: 1.05, range_end: 5 }
    }
}

/// Native extension used by the accelerator check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceleratorCheckConfig {
    pub extension: std::path::PathBuf,
    pub symbol: String,
    pub length: usize,
    pub seed: Option<u64>,
}

impl Default for AcceleratorCheckConfig {
    fn default() -> Self {
        Self {
            extension: "cuda_extension.so".into(),
            symbol: "my_cuda_function".to_string(),
            length: 10,
            seed: None,
        }
    }
}

/// Failure policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Report caught check failures with a zero exit status.
    pub lenient: bool,
}

const LOG_FORMATS: [&str; 3] = ["compact", "pretty", "json"];

impl ProbeConfig {
    /// Load a configuration file; the format follows the extension
    /// (`.json`, anything else is read as TOML).
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ProbeError::Config(format!("{}: {e}", path.display())))?,
            _ => toml::from_str(&content)
                .map_err(|e| ProbeError::Config(format!("{}: {e}", path.display())))?,
        };
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Defaults overlaid with `MLPROBE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(device) = env::var("MLPROBE_DEVICE") {
            self.device.prefer = device.parse()?;
        }
        if let Ok(ordinal) = env::var("MLPROBE_DEVICE_ORDINAL") {
            self.device.ordinal = parse_env("MLPROBE_DEVICE_ORDINAL", &ordinal)?;
        }
        if let Ok(path) = env::var("MLPROBE_EXTENSION") {
            self.accelerator.extension = path.into();
        }
        if let Ok(seed) = env::var("MLPROBE_SEED") {
            self.accelerator.seed = Some(parse_env("MLPROBE_SEED", &seed)?);
        }
        if let Ok(level) = env::var("MLPROBE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = env::var("MLPROBE_LOG_FORMAT") {
            self.logging.format = format.to_ascii_lowercase();
        }
        if let Ok(lenient) = env::var("MLPROBE_LENIENT") {
            self.policy.lenient = parse_bool(&lenient);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let tensor = &self.tensor;
        if tensor.input.is_empty() {
            return Err(ProbeError::Config("tensor.input must not be empty".to_string()));
        }
        if tensor.input.len() != tensor.expected.len() {
            return Err(ProbeError::Config(format!(
                "tensor.input has {} elements but tensor.expected has {}",
                tensor.input.len(),
                tensor.expected.len()
            )));
        }
        if self.activation.range_end == 0 {
            return Err(ProbeError::Config("activation.range_end must be at least 1".to_string()));
        }
        if !self.activation.lambda.is_finite() || self.activation.lambda <= 0.0 {
            return Err(ProbeError::Config("activation.lambda must be positive".to_string()));
        }
        if !self.activation.alpha.is_finite() {
            return Err(ProbeError::Config("activation.alpha must be finite".to_string()));
        }
        if self.accelerator.length == 0 {
            return Err(ProbeError::Config("accelerator.length must be at least 1".to_string()));
        }
        if self.accelerator.symbol.trim().is_empty() {
            return Err(ProbeError::Config("accelerator.symbol must not be empty".to_string()));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ProbeError::Config(format!(
                "unknown log format '{}'. Expected one of: {}",
                self.logging.format,
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ProbeError::Config(e.to_string()))
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ProbeError::Config(format!("invalid {name}: '{value}'")))
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
