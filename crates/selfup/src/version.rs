//! Build and release identity of the running binary

use selfup_update::assets::expected_asset_name;
use selfup_update::Platform;
use serde::{Deserialize, Serialize};

/// What this build is and which release archive would replace it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Semantic version reported to the updater
    pub version: String,

    /// Git commit SHA (short)
    pub commit: Option<String>,

    /// Target triple
    pub target: Option<String>,

    /// Release archive matching this host, if the host is supported
    pub release_asset: Option<String>,
}

impl VersionInfo {
    /// Version info for the current build on the current host
    pub fn current(binary_name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("GIT_SHA").map(String::from),
            target: option_env!("TARGET").map(String::from),
            release_asset: Platform::current()
                .ok()
                .map(|platform| expected_asset_name(binary_name, &platform)),
        }
    }

    /// One-line summary, e.g. `selfup 0.4.0 (abc1234)`
    pub fn display(&self) -> String {
        match &self.commit {
            Some(commit) => format!("selfup {} ({})", self.version, commit),
            None => format!("selfup {}", self.version),
        }
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
