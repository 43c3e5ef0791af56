//! Executable extraction from `.tar.gz` release archives

use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tar::{Archive, EntryType};
use tracing::debug;

use crate::error::{Result, UpdateError};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Extract the regular file whose final path component is `binary_name`
///
/// The first matching entry is written to `{target_dir}/{binary_name}` and
/// its path returned. Directories and links with that name are skipped.
/// If no entry matches, the rest of the compressed stream is read to the end
/// so a truncated download still reports as a format error.
pub fn extract_binary(archive_path: &Path, target_dir: &Path, binary_name: &str) -> Result<PathBuf> {
    let file = File::open(archive_path).map_err(|e| {
        UpdateError::io(format!("failed to open archive {}", archive_path.display()), e)
    })?;
    let mut archive = Archive::new(GzDecoder::new(file));

    let entries = archive.entries().map_err(UpdateError::archive_format)?;
    for entry in entries {
        let mut entry = entry.map_err(UpdateError::archive_format)?;

        if entry.header().entry_type() != EntryType::Regular {
            continue;
        }

        let matches = {
            let path = entry.path().map_err(UpdateError::archive_format)?;
            path.file_name().is_some_and(|name| name == binary_name)
        };
        if !matches {
            continue;
        }

        let output_path = target_dir.join(binary_name);
        let written = write_entry(&mut entry, &output_path)?;
        debug!(path = %output_path.display(), bytes = written, "extracted binary");
        return Ok(output_path);
    }

    io::copy(&mut archive.into_inner(), &mut io::sink()).map_err(UpdateError::archive_format)?;

    Err(UpdateError::BinaryNotFoundInArchive {
        binary: binary_name.to_string(),
    })
}

/// Copy entry content to `output_path`, keeping read and write failures apart
fn write_entry(entry: &mut impl Read, output_path: &Path) -> Result<u64> {
    let write_err =
        |e: io::Error| UpdateError::io(format!("failed to write {}", output_path.display()), e);

    let mut output = File::create(output_path).map_err(write_err)?;
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut written = 0u64;

    loop {
        let n = match entry.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(UpdateError::archive_format(e)),
        };
        output.write_all(&buffer[..n]).map_err(write_err)?;
        written += n as u64;
    }

    output.flush().map_err(write_err)?;
    drop(output);
    set_executable(output_path).map_err(write_err)?;

    Ok(written)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
