//! Version command

use crate::cli::VersionArgs;
use crate::version::VersionInfo;
use anyhow::Result;
use selfup_core::types::UpdateConfig;

pub fn run(args: VersionArgs) -> Result<()> {
    let binary_name = match super::load_runtime_config() {
        Ok(config) => config.update.binary_name,
        Err(e) => {
            tracing::debug!("Using default binary name: {:#}", e);
            UpdateConfig::default().binary_name
        }
    };
    let info = VersionInfo::current(&binary_name);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info.display());

        if let Some(target) = &info.target {
            println!("Target:        {}", target);
        }
        match &info.release_asset {
            Some(asset) => println!("Release asset: {}", asset),
            None => println!("Release asset: none (unsupported platform)"),
        }
    }

    Ok(())
}
