//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `classify` - Offline classification of one description
//! - `models` - Artifact listing
//! - `serve` - Web server command
//! - `train` - Model training from a labeled CSV

pub mod classify;
pub mod models;
pub mod serve;
pub mod train;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dompet_core::Config;
use tracing::debug;

// Re-export command functions for main.rs
pub use classify::*;
pub use models::*;
pub use serve::*;
pub use train::*;

/// Resolve configuration: file layers, then environment
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load(path).context("Failed to load configuration")?;
    debug!(
        host = %config.server.host,
        port = config.server.port,
        models = %config.models.dir.display(),
        "Configuration resolved"
    );
    Ok(config)
}

/// Apply a `--model-dir` flag over the configured directory
pub fn with_model_dir(mut config: Config, model_dir: Option<PathBuf>) -> Config {
    if let Some(dir) = model_dir {
        config.models.dir = dir;
    }
    config
}
