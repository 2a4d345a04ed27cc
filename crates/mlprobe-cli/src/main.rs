//! mlprobe: smoke tests for a tensor framework and native accelerator extensions

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use mlprobe_cli::commands::{self, AcceleratorCommand, ConfigAction};
use mlprobe_cli::config;
use mlprobe_cli::exit::{EXIT_SUCCESS, code_for_error};
use mlprobe_cli::logging::setup_logging;
use mlprobe_cli::output::{OutputConfig, OutputFormat};
use mlprobe_common::{DevicePreference, LoggingConfig, ProbeConfig};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "mlprobe")]
#[command(about = "Smoke tests for the tensor framework and native accelerator extensions")]
#[command(long_about = r#"
mlprobe verifies that the tensor framework works on this machine and that a
natively compiled accelerator extension can be loaded and run on device memory.

Examples:
  # Add a scalar to a small tensor and check the result
  mlprobe tensor

  # Evaluate SELU over 0..5 on the best available device
  mlprobe activation --device auto

  # Run a CUDA extension kernel on random device input
  mlprobe accelerator --extension ./cuda_extension.so --symbol my_cuda_function

  # Everything, as JSON
  mlprobe all --format json

Exit codes: 0 success, 1 unexpected error, 3 check failed, 4 extension error,
5 device unavailable, 6 invalid configuration.
"#)]
#[command(version)]
struct Cli {
    /// Configuration file path (TOML, or JSON with a .json extension)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Device to use (auto, cpu, cuda)
    #[arg(short, long, value_name = "DEVICE", global = true)]
    device: Option<DevicePreference>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Exit 0 even when a check reports a failure
    #[arg(long, global = true)]
    lenient: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a scalar to a literal tensor and verify the result
    Tensor,

    /// Evaluate SELU over a small range and print the result
    #[command(alias = "selu")]
    Activation,

    /// Load a native extension and run its kernel on device input
    #[command(alias = "accel")]
    Accelerator(AcceleratorCommand),

    /// Run every check in sequence
    All {
        /// Let the accelerator check fall back to the CPU
        #[arg(long)]
        allow_cpu: bool,
    },

    /// Show build, framework, and hardware information
    Info,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return;
    }

    let config = load_configuration(&cli);

    let logging = match &config {
        Ok(config) => config.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    if let Err(e) = setup_logging(&logging, cli.log_level.as_deref()) {
        eprintln!("failed to initialise logging: {e:#}");
    }

    let output = OutputConfig::new(cli.format);
    let result = config.and_then(|config| run(cli.command, &config, &output));

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            error!("Command failed: {}", e);
            for cause in e.chain().skip(1) {
                error!("  Caused by: {}", cause);
            }
            code_for_error(&e)
        }
    };
    debug!(code, "exiting");
    std::process::exit(code);
}

/// File, then environment, then command-line flags.
fn load_configuration(cli: &Cli) -> Result<ProbeConfig> {
    let mut config = config::load(cli.config.as_deref())?;

    if let Some(device) = cli.device {
        config.device.prefer = device;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.lenient {
        config.policy.lenient = true;
    }
    if let Some(Commands::Accelerator(cmd)) = &cli.command {
        cmd.apply(&mut config);
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(command: Option<Commands>, config: &ProbeConfig, output: &OutputConfig) -> Result<i32> {
    match command {
        Some(Commands::Tensor) => commands::tensor::execute(config, output),
        Some(Commands::Activation) => commands::activation::execute(config, output),
        Some(Commands::Accelerator(cmd)) => cmd.execute(config, output),
        Some(Commands::All { allow_cpu }) => commands::all::execute(config, output, allow_cpu),
        Some(Commands::Info) => commands::info::execute(output).map(|()| EXIT_SUCCESS),
        Some(Commands::Config { action }) => {
            commands::config::execute(action, config, output).map(|()| EXIT_SUCCESS)
        }
        None => {
            Cli::command().print_help()?;
            Ok(EXIT_SUCCESS)
        }
    }
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
