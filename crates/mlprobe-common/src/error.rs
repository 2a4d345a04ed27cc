//! Error types for mlprobe

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while running a smoke check.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{0}")]
    TensorMismatch(String),

    #[error("tensor framework error: {0}")]
    Framework(String),

    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("failed to load extension {path}: {reason}")]
    ExtensionLoad { path: PathBuf, reason: String },

    #[error("symbol `{symbol}` not found in {path}")]
    SymbolNotFound { path: PathBuf, symbol: String },

    #[error("kernel `{name}` failed with status {code}")]
    KernelFailed { name: String, code: i32 },

    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<candle_core::Error> for ProbeError {
    fn from(err: candle_core::Error) -> Self {
        Self::Framework(err.to_string())
    }
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, ProbeError>;
