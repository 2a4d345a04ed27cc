//! Tracing subscriber setup

use std::io::IsTerminal;

use anyhow::Result;
use mlprobe_common::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Events go to stderr so stdout carries only
/// check reports, with colour only when stderr is a terminal. `RUST_LOG` takes
/// precedence over the configured level.
pub fn setup_logging(config: &LoggingConfig, level_override: Option<&str>) -> Result<()> {
    let level = level_override.unwrap_or(&config.level);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    match config.format.as_str() {
        "json" => subscriber.json().with_timer(tracing_subscriber::fmt::time::uptime()).init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.compact().init(),
    }

    Ok(())
}
