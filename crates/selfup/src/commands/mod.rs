//! Command implementations

pub mod config;
pub mod update;
pub mod version;

use anyhow::{Context, Result};
use selfup_core::{HierarchicalConfigLoader, RuntimeConfig};

/// Load the runtime configuration from defaults, user file and environment
pub fn load_runtime_config() -> Result<RuntimeConfig> {
    let loader = HierarchicalConfigLoader::new().context("Failed to create config loader")?;
    loader
        .load_runtime_config()
        .context("Failed to load runtime config")
}
