//! Report rendering for CLI commands.
//!
//! `--format text` prints each report's human-readable form to stdout;
//! `--format json` prints one JSON document per check instead.

use std::io::Write;

use anyhow::{Context, Result};
use mlprobe_checks::{CheckOutcome, CheckReport};
use serde::Serialize;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a, R: Serialize> {
    check: &'a str,
    report: &'a R,
}

/// Global output configuration derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write a report to stdout and return its outcome.
    pub fn emit<R: CheckReport>(&self, check: &str, report: &R) -> Result<CheckOutcome> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.write_report(&mut out, check, report)?;
        out.flush().context("failed to flush stdout")?;
        Ok(report.outcome())
    }

    pub fn write_report<W: Write, R: CheckReport>(
        &self,
        out: &mut W,
        check: &str,
        report: &R,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Text => write!(out, "{report}")?,
            OutputFormat::Json => {
                let json = serde_json::to_string(&Envelope { check, report })
                    .context("failed to serialize report")?;
                writeln!(out, "{json}")?;
            }
        }
        Ok(())
    }

    /// Print a serializable value as pretty JSON.
    pub fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
