//! In-memory release source
//!
//! Serves a fixed release and asset bodies, and records which assets were
//! downloaded so tests can assert that a stage never ran.

use async_trait::async_trait;
use selfup_update::error::{Result, UpdateError};
use selfup_update::releases::{Release, ReleaseSource};
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::archive::*;
use super::builders::ReleaseBuilder;
use super::constants::*;

/// Release source backed by maps
#[derive(Debug)]
pub struct FakeReleaseSource {
    release: Option<Release>,
    bodies: HashMap<u64, Vec<u8>>,
    failing_downloads: Vec<u64>,
    downloads: Mutex<Vec<u64>>,
    lookups: AtomicUsize,
}

impl FakeReleaseSource {
    /// Source whose latest release is `release`
    pub fn new(release: Release) -> Self {
        Self {
            release: Some(release),
            bodies: HashMap::new(),
            failing_downloads: Vec::new(),
            downloads: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Source whose latest-release lookup fails
    pub fn unreachable() -> Self {
        Self {
            release: None,
            bodies: HashMap::new(),
            failing_downloads: Vec::new(),
            downloads: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Serve `body` for asset `id`
    pub fn with_body(mut self, id: u64, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(id, body.into());
        self
    }

    /// Fail downloads of asset `id`
    pub fn with_failing_download(mut self, id: u64) -> Self {
        self.failing_downloads.push(id);
        self
    }

    /// Number of latest-release lookups so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Asset ids downloaded so far, in order
    pub fn downloads(&self) -> Vec<u64> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReleaseSource for FakeReleaseSource {
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.release.clone().ok_or_else(|| {
            UpdateError::network(
                "fetching latest release",
                format!("no published release for {}/{}", owner, repo),
            )
        })
    }

    async fn download_asset(
        &self,
        _owner: &str,
        _repo: &str,
        asset_id: u64,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64> {
        self.downloads.lock().unwrap().push(asset_id);

        if self.failing_downloads.contains(&asset_id) {
            return Err(UpdateError::network(
                "downloading release asset",
                "connection reset by peer",
            ));
        }

        let body = self.bodies.get(&asset_id).ok_or_else(|| {
            UpdateError::network("downloading release asset", format!("asset {} returned 404", asset_id))
        })?;
        sink.write_all(body)
            .map_err(|e| UpdateError::io("failed to write downloaded asset", e))?;
        Ok(body.len() as u64)
    }
}

/// A `v2.0.0` release whose Linux archive holds `binary` and whose manifest
/// lists the archive's real digest
pub fn updatable_source(binary: &[u8]) -> FakeReleaseSource {
    let archive = release_archive(BINARY_NAME, binary);
    let manifest = manifest_line(&archive, ASSET_LINUX_X86_64)
        + &manifest_line(b"darwin archive", ASSET_DARWIN_ARM64);

    FakeReleaseSource::new(ReleaseBuilder::new().with_standard_assets().build())
        .with_body(ARCHIVE_ID, archive)
        .with_body(OTHER_ARCHIVE_ID, b"darwin archive".to_vec())
        .with_body(CHECKSUMS_ID, manifest)
}
