//! Error taxonomy for the update pipeline
//!
//! Every variant maps to exactly one [`ErrorKind`] so callers can branch on
//! the failure class without looking at the message text.

use std::io;
use thiserror::Error;

use crate::state::Stage;

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors raised by individual pipeline components
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Release lookup or asset download failed
    #[error("network error while {operation}: {message}")]
    Network { operation: String, message: String },

    /// No release asset follows the platform naming convention
    #[error("no release asset named {expected}")]
    AssetNotFound { expected: String },

    /// Downloaded bytes do not hash to the published digest
    #[error("checksum mismatch: expected {expected:?}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// gzip or tar decoding failed
    #[error("invalid archive: {message}")]
    ArchiveFormat { message: String },

    /// The whole archive was scanned without finding the executable
    #[error("binary {binary} not found in archive")]
    BinaryNotFoundInArchive { binary: String },

    /// The swap failed and the previous binary was restored
    #[error("failed to apply update, previous binary restored: {cause}")]
    ApplyFailedRolledBack {
        #[source]
        cause: io::Error,
    },

    /// The swap failed and restoring the previous binary failed too
    #[error(
        "failed to apply update ({apply_cause}) and rollback failed ({rollback_cause}); installed binary may be broken"
    )]
    ApplyFailedRollbackFailed {
        apply_cause: io::Error,
        rollback_cause: io::Error,
    },

    /// Local file operation failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Host OS or architecture has no published archive label
    #[error("unsupported platform {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The update target is misconfigured
    #[error("invalid update target: {message}")]
    InvalidTarget { message: String },
}

/// Failure class of an [`UpdateError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    AssetNotFound,
    ChecksumMismatch,
    ArchiveFormat,
    BinaryNotFoundInArchive,
    ApplyFailedRolledBack,
    ApplyFailedRollbackFailed,
    Io,
    UnsupportedPlatform,
    InvalidTarget,
}

impl UpdateError {
    /// Create a network error for the given operation
    pub fn network(operation: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Network {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Create an archive format error
    pub fn archive_format(message: impl std::fmt::Display) -> Self {
        Self::ArchiveFormat {
            message: message.to_string(),
        }
    }

    /// Wrap an IO error with what was being attempted
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid target error
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            message: message.into(),
        }
    }

    /// Failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::AssetNotFound { .. } => ErrorKind::AssetNotFound,
            Self::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            Self::ArchiveFormat { .. } => ErrorKind::ArchiveFormat,
            Self::BinaryNotFoundInArchive { .. } => ErrorKind::BinaryNotFoundInArchive,
            Self::ApplyFailedRolledBack { .. } => ErrorKind::ApplyFailedRolledBack,
            Self::ApplyFailedRollbackFailed { .. } => ErrorKind::ApplyFailedRollbackFailed,
            Self::Io { .. } => ErrorKind::Io,
            Self::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            Self::InvalidTarget { .. } => ErrorKind::InvalidTarget,
        }
    }

    /// True when the installed binary may be left in an unknown state
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::ApplyFailedRollbackFailed { .. })
    }
}

/// A pipeline failure tagged with the stage it happened in
#[derive(Error, Debug)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    /// Stage that failed
    pub stage: Stage,

    /// Underlying error
    #[source]
    pub source: UpdateError,
}

impl StageError {
    pub fn new(stage: Stage, source: UpdateError) -> Self {
        Self { stage, source }
    }

    /// Failure class of the underlying error
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// True when the installed binary may be left in an unknown state
    pub fn is_indeterminate(&self) -> bool {
        self.source.is_indeterminate()
    }
}
