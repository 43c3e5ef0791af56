//! Scripted executable replacer
//!
//! Records every call and what the staged binary looked like, and fails the
//! steps it is told to fail.

use selfup_update::swap::ExecutableReplacer;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// What the replacer saw when `stage` was called
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedBinary {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct RecordingReplacer {
    fail_swap: bool,
    fail_rollback: bool,
    calls: Mutex<Vec<&'static str>>,
    staged: Mutex<Option<StagedBinary>>,
}

impl RecordingReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the swap step
    pub fn failing_swap(mut self) -> Self {
        self.fail_swap = true;
        self
    }

    /// Fail the rollback step as well
    pub fn failing_rollback(mut self) -> Self {
        self.fail_rollback = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn staged(&self) -> Option<StagedBinary> {
        self.staged.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ExecutableReplacer for RecordingReplacer {
    fn stage(&self, new_binary: &Path) -> io::Result<()> {
        self.record("stage");
        let content = fs::read(new_binary)?;
        *self.staged.lock().unwrap() = Some(StagedBinary {
            path: new_binary.to_path_buf(),
            content,
        });
        Ok(())
    }

    fn swap(&self) -> io::Result<()> {
        self.record("swap");
        if self.fail_swap {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "target is read-only"));
        }
        Ok(())
    }

    fn validate(&self) -> io::Result<()> {
        self.record("validate");
        Ok(())
    }

    fn rollback(&self) -> io::Result<()> {
        self.record("rollback");
        if self.fail_rollback {
            return Err(io::Error::new(io::ErrorKind::NotFound, "backup disappeared"));
        }
        Ok(())
    }

    fn finalize(&self) {
        self.record("finalize");
    }
}
