//! Atomic executable replacement with rollback
//!
//! [`ExecutableReplacer`] is the filesystem primitive; [`FileSwap`] is the
//! real implementation. [`BinarySwapper`] drives it and turns failures into
//! the two apply outcomes: rolled back, or rollback failed too.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

use crate::error::{Result, UpdateError};

/// Low-level operations needed to replace an installed executable
///
/// Calls arrive in order `stage`, `swap`, `validate`, then either `finalize`
/// on success or `rollback` after any failure.
pub trait ExecutableReplacer: Send + Sync {
    /// Put the new binary next to the target so the swap is a rename
    fn stage(&self, new_binary: &Path) -> io::Result<()>;

    /// Move the target aside and the staged binary into its place
    fn swap(&self) -> io::Result<()>;

    /// Check the installed binary after the swap
    fn validate(&self) -> io::Result<()> {
        Ok(())
    }

    /// Undo whatever `stage` and `swap` did
    fn rollback(&self) -> io::Result<()>;

    /// Clean up after a successful swap; failures are only logged
    fn finalize(&self);
}

/// Replaces an executable on disk by renaming within its directory
///
/// The previous binary is kept at `.{name}.old` until the update succeeds.
/// On Windows the running executable cannot be deleted, so that backup may
/// stay until the next update removes it.
#[derive(Debug)]
pub struct FileSwap {
    target: PathBuf,
    staged: PathBuf,
    backup: PathBuf,
    validate_args: Option<Vec<String>>,
    swapped: AtomicBool,
}

impl FileSwap {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        let target = target.into();
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            staged: target.with_file_name(format!(".{}.new", name)),
            backup: target.with_file_name(format!(".{}.old", name)),
            target,
            validate_args: None,
            swapped: AtomicBool::new(false),
        }
    }

    /// Target the running executable, following symlinks to the real file
    pub fn current_exe() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let exe = fs::canonicalize(&exe).unwrap_or(exe);
        Ok(Self::new(exe))
    }

    /// Run `<target> <args>` after the swap and require a zero exit status
    pub fn with_validation<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validate_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn staged_path(&self) -> &Path {
        &self.staged
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup
    }
}

impl ExecutableReplacer for FileSwap {
    fn stage(&self, new_binary: &Path) -> io::Result<()> {
        remove_if_exists(&self.staged)?;
        if let Err(e) = remove_if_exists(&self.backup) {
            // A backup still held by a running process is harmless here
            debug!(path = %self.backup.display(), error = %e, "could not remove stale backup");
        }

        debug!(from = %new_binary.display(), to = %self.staged.display(), "staging new binary");
        fs::copy(new_binary, &self.staged)?;
        set_executable(&self.staged, &self.target)
    }

    fn swap(&self) -> io::Result<()> {
        if self.backup.exists() {
            fs::remove_file(&self.backup)?;
        }

        fs::rename(&self.target, &self.backup)?;
        self.swapped.store(true, Ordering::SeqCst);

        fs::rename(&self.staged, &self.target)?;
        info!(path = %self.target.display(), "binary replaced");
        Ok(())
    }

    fn validate(&self) -> io::Result<()> {
        let Some(args) = &self.validate_args else {
            return Ok(());
        };

        let output = Command::new(&self.target).args(args).output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{} {} exited with {}",
                self.target.display(),
                args.join(" "),
                output.status
            )));
        }

        debug!(
            output = %String::from_utf8_lossy(&output.stdout).trim(),
            "new binary validated"
        );
        Ok(())
    }

    fn rollback(&self) -> io::Result<()> {
        if self.swapped.swap(false, Ordering::SeqCst) {
            warn!(path = %self.target.display(), "restoring previous binary");
            #[cfg(windows)]
            remove_if_exists(&self.target)?;
            fs::rename(&self.backup, &self.target)?;
        }

        // The target is intact at this point; a leftover staged file is only litter
        if let Err(e) = remove_if_exists(&self.staged) {
            warn!(path = %self.staged.display(), error = %e, "failed to remove staged binary");
        }
        Ok(())
    }

    fn finalize(&self) {
        self.swapped.store(false, Ordering::SeqCst);
        if let Err(e) = remove_if_exists(&self.backup) {
            if cfg!(windows) {
                debug!(path = %self.backup.display(), error = %e, "backup left until next update");
            } else {
                warn!(path = %self.backup.display(), error = %e, "failed to remove backup");
            }
        }
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Give `path` the permission bits of `like`, or 0o755 when `like` is missing
#[cfg(unix)]
fn set_executable(path: &Path, like: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mode = match fs::metadata(like) {
        Ok(meta) => meta.permissions().mode() & 0o7777,
        Err(_) => 0o755,
    };
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path, _like: &Path) -> io::Result<()> {
    Ok(())
}

/// Applies a new binary through an [`ExecutableReplacer`], rolling back on failure
#[derive(Debug)]
pub struct BinarySwapper<R> {
    replacer: R,
}

impl<R: ExecutableReplacer> BinarySwapper<R> {
    pub fn new(replacer: R) -> Self {
        Self { replacer }
    }

    pub fn replacer(&self) -> &R {
        &self.replacer
    }

    /// Stage, swap and validate `new_binary`
    ///
    /// Any failure triggers a rollback. The error says whether the previous
    /// binary was restored; a failed rollback is never swallowed.
    pub fn apply(&self, new_binary: &Path) -> Result<()> {
        let applied = self
            .replacer
            .stage(new_binary)
            .and_then(|()| self.replacer.swap())
            .and_then(|()| self.replacer.validate());

        let cause = match applied {
            Ok(()) => {
                self.replacer.finalize();
                return Ok(());
            }
            Err(cause) => cause,
        };

        warn!(error = %cause, "applying update failed, rolling back");
        match self.replacer.rollback() {
            Ok(()) => Err(UpdateError::ApplyFailedRolledBack { cause }),
            Err(rollback_cause) => {
                error!(
                    apply_error = %cause,
                    rollback_error = %rollback_cause,
                    "rollback failed, installed binary may be broken"
                );
                Err(UpdateError::ApplyFailedRollbackFailed {
                    apply_cause: cause,
                    rollback_cause,
                })
            }
        }
    }
}
