//! `mlprobe info`: build, framework, and hardware summary

use anyhow::Result;
use console::style;
use mlprobe_device_probe::DeviceCapabilities;
use mlprobe_kernels::CANDLE_VERSION;
use serde::Serialize;

use crate::output::{OutputConfig, OutputFormat};

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub version: &'static str,
    pub build_timestamp: &'static str,
    pub rustc: &'static str,
    pub target: &'static str,
    pub candle: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
    pub devices: DeviceCapabilities,
}

impl SystemInfo {
    pub fn collect() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build_timestamp: option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
            rustc: option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown"),
            target: option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown"),
            candle: CANDLE_VERSION,
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            devices: DeviceCapabilities::detect(),
        }
    }
}

fn mark(enabled: bool) -> console::StyledObject<&'static str> {
    if enabled { style("✓").green() } else { style("✗").red() }
}

pub fn execute(output: &OutputConfig) -> Result<()> {
    let info = SystemInfo::collect();
    if output.format == OutputFormat::Json {
        return output.json(&info);
    }

    println!("{}", style("mlprobe System Information").bold().cyan());
    println!();

    println!("{}", style("Version:").bold());
    println!("  mlprobe: {}", info.version);
    println!("  candle: {}", info.candle);
    println!("  Rust: {}", info.rustc);
    println!("  Built: {} ({})", info.build_timestamp, info.target);
    println!();

    println!("{}", style("System:").bold());
    println!("  OS: {}", info.os);
    println!("  Architecture: {}", info.arch);
    let cpu = &info.devices.cpu;
    println!("  CPU cores: {}", cpu.cores);
    println!("  SIMD: {}", cpu.simd);
    for feature in &cpu.features {
        println!("    {feature}: {}", mark(true));
    }
    println!();

    println!("{}", style("Devices:").bold());
    println!("  CPU: {}", mark(true));
    println!("  CUDA compiled: {}", mark(info.devices.cuda_compiled));
    println!("  CUDA available: {}", mark(info.devices.cuda_available));
    Ok(())
}
