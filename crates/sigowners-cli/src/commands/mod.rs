//! CLI subcommands

pub mod check;
pub mod decode;

use anyhow::{Context, Result};
use sigowners_core::{OwnershipConfig, SigownersConfig};
use std::path::Path;

/// Load configuration from `path` (or defaults) and apply `SIGOWNERS_*` overrides.
pub fn load_config(path: Option<&Path>) -> Result<OwnershipConfig> {
    let mut config = match path {
        Some(path) => OwnershipConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => OwnershipConfig::defaults(),
    };
    config
        .merge_with_env()
        .context("applying environment overrides")?;
    Ok(config)
}
