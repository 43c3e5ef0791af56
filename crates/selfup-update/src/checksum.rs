//! SHA-256 verification of downloaded artifacts

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, UpdateError};

/// Read buffer size used while hashing
const CHUNK_SIZE: usize = 1024 * 1024;

/// Lowercase hex SHA-256 digest of a file, streamed in 1 MiB chunks
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .map_err(|e| UpdateError::io(format!("failed to open {}", path.display()), e))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| UpdateError::io(format!("failed to read {}", path.display()), e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Check a file against the published digest
///
/// The expected value is trimmed and compared case-insensitively. An empty
/// expected digest always fails, so an asset missing from the manifest can
/// never be installed.
pub fn verify(path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file(path)?;
    let expected = expected.trim().to_ascii_lowercase();

    if expected.is_empty() || expected != actual {
        return Err(UpdateError::ChecksumMismatch { expected, actual });
    }

    debug!(path = %path.display(), checksum = %actual, "checksum verified");
    Ok(())
}
