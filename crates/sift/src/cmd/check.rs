//! Check command - validate a configuration file
//!
//! # Usage
//!
//! ```bash
//! sift check --config sift.toml
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,
}

/// Run the check command
pub fn run(args: CheckArgs) -> Result<()> {
    let config = super::load_config(Some(&args.config))?;

    println!(
        "{}: ok (session '{}', level {}, format {})",
        args.config.display(),
        config.session.name,
        config.session.level.as_str(),
        config.format.kind,
    );
    Ok(())
}
