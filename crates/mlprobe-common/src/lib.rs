//! Common types for mlprobe
//!
//! Devices, framework metadata, error handling, and the probe configuration
//! shared by every crate in the workspace.

pub mod config;
pub mod device;
pub mod error;

pub use config::*;
pub use device::*;
pub use error::*;
