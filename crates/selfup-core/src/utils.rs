//! Shared utility functions for selfup crates

use anyhow::anyhow;
use std::path::PathBuf;

/// Get the user's home directory
///
/// HOME wins over `dirs::home_dir()` so container setups that override HOME
/// resolve the same directory shell scripts do.
pub fn get_home_dir() -> anyhow::Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }

    // USERPROFILE on Windows, /etc/passwd elsewhere
    dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))
}
