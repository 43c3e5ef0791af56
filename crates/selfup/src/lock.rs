//! Process-wide update lock
//!
//! Only one update of a given executable may run at a time. The lock is an
//! exclusive advisory lock on `.{exe}.update-lock` in the executable's
//! directory, released when the guard is dropped. The file itself is left
//! in place.

use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Held for the duration of an update
#[derive(Debug)]
pub struct UpdateLock {
    _file: File,
    path: PathBuf,
}

impl UpdateLock {
    /// Lock file path for `executable`
    pub fn path_for(executable: &Path) -> PathBuf {
        let name = executable
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        executable.with_file_name(format!(".{}.update-lock", name))
    }

    /// Block until the update lock for `executable` is held
    pub fn acquire(executable: &Path) -> Result<Self> {
        let path = Self::path_for(executable);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open update lock {}", path.display()))?;

        // Released on drop
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", path.display()))?;

        debug!("Holding update lock {}", path.display());
        Ok(Self { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
