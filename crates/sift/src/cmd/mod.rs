//! Command implementations for the sift CLI

pub mod check;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use sift_config::Config;

/// Load the configuration file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}
