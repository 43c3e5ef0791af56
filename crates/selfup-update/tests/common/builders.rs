//! Builder patterns for test data construction

use selfup_update::releases::{Release, ReleaseAsset};

use super::constants::*;

/// Builder for constructing Release objects with sensible test defaults
#[derive(Debug, Clone)]
pub struct ReleaseBuilder {
    tag_name: String,
    assets: Vec<ReleaseAsset>,
}

impl ReleaseBuilder {
    /// Create a new ReleaseBuilder tagged `v2.0.0` with no assets
    pub fn new() -> Self {
        Self {
            tag_name: TAG_V2_0_0.to_string(),
            assets: Vec::new(),
        }
    }

    /// Set the tag name
    pub fn tag(mut self, tag: &str) -> Self {
        self.tag_name = tag.to_string();
        self
    }

    /// Add a single asset
    pub fn asset(mut self, id: u64, name: &str) -> Self {
        self.assets.push(ReleaseAsset {
            id,
            name: name.to_string(),
        });
        self
    }

    /// Add the Linux x86_64 archive and the checksum manifest
    pub fn with_standard_assets(self) -> Self {
        self.asset(ARCHIVE_ID, ASSET_LINUX_X86_64)
            .asset(OTHER_ARCHIVE_ID, ASSET_DARWIN_ARM64)
            .asset(CHECKSUMS_ID, CHECKSUMS_NAME)
    }

    /// Build the Release
    pub fn build(self) -> Release {
        Release {
            tag_name: self.tag_name,
            assets: self.assets,
        }
    }
}

impl Default for ReleaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
