//! Sift - structured log replay
//!
//! # Usage
//!
//! ```bash
//! # Format JSON-lines log events from stdin to stdout
//! app | sift replay
//! app | sift replay --config sift.toml --output app.log
//!
//! # Validate a configuration file
//! sift check --config sift.toml
//! ```

mod cmd;

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sift_config::{LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sift - structured log replay
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format log events read from stdin
    Replay(cmd::replay::ReplayArgs),

    /// Validate a configuration file
    Check(cmd::check::CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Replay(args) => {
            let mut config = cmd::load_config(args.config.as_deref())?;
            config.log.override_level(cli.log_level.as_deref())?;
            init_logging(&config.log)?;
            cmd::replay::run(args, &config)
        }
        // Check only prints its verdict
        Command::Check(args) => cmd::check::run(args),
    }
}

/// Initialize the tracing subscriber; diagnostics go to stderr
fn init_logging(log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(log.level.as_str())
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    match log.format {
        LogFormat::Console => tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(io::stderr))
            .with(filter)
            .init(),
    }

    Ok(())
}
