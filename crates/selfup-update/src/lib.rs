//! Self-update pipeline for command-line binaries published as GitHub releases
//!
//! Provides:
//! - Version checking against the latest release
//! - Checksum manifest parsing and platform asset resolution
//! - SHA-256 verification of the downloaded archive
//! - Executable extraction from `.tar.gz` archives
//! - Atomic binary replacement with automatic rollback
//! - Observable pipeline state for progress reporting

pub mod assets;
pub mod checksum;
pub mod context;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod platform;
pub mod releases;
pub mod state;
pub mod swap;
pub mod updater;
pub mod version;

pub use assets::Asset;
pub use context::{PipelineContext, UpdateTarget};
pub use error::{ErrorKind, Result, StageError, UpdateError};
pub use manifest::ChecksumManifest;
pub use platform::{Arch, Os, Platform};
pub use releases::{GitHubReleases, Release, ReleaseAsset, ReleaseSource};
pub use state::{NoOpObserver, Stage, StateObserver, TracingObserver, UpdateState};
pub use swap::{BinarySwapper, ExecutableReplacer, FileSwap};
pub use updater::{UpdateCheck, UpdateOutcome, UpdatePipeline};
