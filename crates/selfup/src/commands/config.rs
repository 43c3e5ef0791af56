//! Config command

use anyhow::{Context, Result};
use selfup_core::HierarchicalConfigLoader;

use crate::cli::ConfigArgs;

pub fn run(args: ConfigArgs) -> Result<()> {
    let loader = HierarchicalConfigLoader::new().context("Failed to create config loader")?;

    if args.path {
        println!("{}", loader.runtime_config_path());
        return Ok(());
    }

    let config = loader
        .load_runtime_config()
        .context("Failed to load runtime config")?;
    let yaml = serde_yaml_ng::to_string(&config.redacted()).context("Failed to render config")?;
    print!("{}", yaml);
    Ok(())
}
