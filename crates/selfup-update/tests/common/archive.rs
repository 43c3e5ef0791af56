//! Release archive fixtures
//!
//! Builds `.tar.gz` archives in memory the way release tooling lays them out.

use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use tar::{Builder, EntryType, Header};

/// An entry to put in a fixture archive
pub enum ArchiveEntry<'a> {
    Dir(&'a str),
    File(&'a str, &'a [u8]),
}

/// Build a gzip-compressed tar archive from `entries`, in order
pub fn tar_gz(entries: &[ArchiveEntry<'_>]) -> Vec<u8> {
    let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    for entry in entries {
        let mut header = Header::new_gnu();
        match entry {
            ArchiveEntry::Dir(name) => {
                header.set_entry_type(EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                header.set_cksum();
                builder
                    .append_data(&mut header, name, std::io::empty())
                    .unwrap();
            }
            ArchiveEntry::File(name, content) => {
                header.set_entry_type(EntryType::Regular);
                header.set_size(content.len() as u64);
                header.set_mode(0o755);
                header.set_cksum();
                builder.append_data(&mut header, name, *content).unwrap();
            }
        }
    }

    builder.into_inner().unwrap().finish().unwrap()
}

/// Archive laid out like a typical release: a directory, docs and the binary
pub fn release_archive(binary_name: &str, content: &[u8]) -> Vec<u8> {
    let dir = format!("{}/", binary_name);
    let nested = format!("{}/{}", binary_name, binary_name);
    tar_gz(&[
        ArchiveEntry::Dir(&dir),
        ArchiveEntry::File("README.md", b"# tool\n"),
        ArchiveEntry::File(&nested, content),
    ])
}

/// Flip a byte of the gzip CRC32 trailer
pub fn with_bad_crc(mut archive: Vec<u8>) -> Vec<u8> {
    let crc = archive.len() - 8;
    archive[crc] ^= 0xff;
    archive
}

/// Drop the last `n` bytes, as an interrupted download would
pub fn truncated(mut archive: Vec<u8>, n: usize) -> Vec<u8> {
    archive.truncate(archive.len() - n);
    archive
}

/// Lowercase hex SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// One manifest line in `sha256sum` format
pub fn manifest_line(bytes: &[u8], name: &str) -> String {
    format!("{}  {}\n", sha256_hex(bytes), name)
}
