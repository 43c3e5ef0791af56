//! Checksum manifest parsing
//!
//! Manifests are `sha256sum`-style text: `<hex digest> <filename>` per line.
//! Parsing is lenient. Lines that do not split into a digest and a name are
//! dropped so one bad line cannot block verification of the others.

use std::collections::HashMap;
use tracing::trace;

/// Mapping from exact asset filename to its published hex digest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: HashMap<String, String>,
}

impl ChecksumManifest {
    /// Parse manifest text
    ///
    /// Each non-empty line is split on its first space. Both halves are
    /// trimmed; a line missing either half is skipped. When a filename
    /// appears more than once the last line wins.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for (index, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }

            let Some((checksum, name)) = line.split_once(' ') else {
                trace!(line = index + 1, "skipping manifest line without separator");
                continue;
            };

            let checksum = checksum.trim();
            let name = name.trim();
            if checksum.is_empty() || name.is_empty() {
                trace!(line = index + 1, "skipping incomplete manifest line");
                continue;
            }

            entries.insert(name.to_string(), checksum.to_string());
        }

        Self { entries }
    }

    /// Combine with another manifest; entries from `other` win
    pub fn merged(mut self, other: ChecksumManifest) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Published digest for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (filename, digest) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
