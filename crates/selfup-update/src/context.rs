//! Update target identity and per-run pipeline context

use std::path::{Path, PathBuf};

use crate::assets::Asset;
use crate::error::{Result, UpdateError};
use crate::platform::Platform;
use crate::releases::Release;

/// The binary being kept up to date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTarget {
    owner: String,
    repo: String,
    binary_name: String,
    current_version: String,
}

impl UpdateTarget {
    /// Describe a binary published from `owner/repo`
    ///
    /// `binary_name` is both the archive prefix and the file name looked for
    /// inside the archive, so it must be a bare file name.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        binary_name: impl Into<String>,
        current_version: impl Into<String>,
    ) -> Result<Self> {
        let target = Self {
            owner: owner.into(),
            repo: repo.into(),
            binary_name: binary_name.into(),
            current_version: current_version.into(),
        };

        if target.owner.is_empty() || target.repo.is_empty() {
            return Err(UpdateError::invalid_target("repository owner and name are required"));
        }
        if target.binary_name.is_empty() {
            return Err(UpdateError::invalid_target("binary name is empty"));
        }
        if target.binary_name.contains(['/', '\\']) {
            return Err(UpdateError::invalid_target(format!(
                "binary name {:?} contains a path separator",
                target.binary_name
            )));
        }

        Ok(target)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }
}

/// Everything a run knows once the release is resolved
///
/// Built once per run after asset resolution and scratch creation, then
/// only read.
#[derive(Debug)]
pub struct PipelineContext {
    target: UpdateTarget,
    platform: Platform,
    release: Release,
    assets: Vec<Asset>,
    selected: Asset,
    scratch_dir: PathBuf,
}

impl PipelineContext {
    pub(crate) fn new(
        target: UpdateTarget,
        platform: Platform,
        release: Release,
        assets: Vec<Asset>,
        selected: Asset,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            target,
            platform,
            release,
            assets,
            selected,
            scratch_dir,
        }
    }

    pub fn target(&self) -> &UpdateTarget {
        &self.target
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn release(&self) -> &Release {
        &self.release
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// The asset chosen for this platform
    pub fn asset(&self) -> &Asset {
        &self.selected
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Where the selected archive is downloaded to
    pub fn archive_path(&self) -> PathBuf {
        self.scratch_dir.join(&self.asset().name)
    }
}
