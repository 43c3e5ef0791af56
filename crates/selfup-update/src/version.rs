//! Version comparison
//!
//! Up-to-date means "same string once a leading `v` is dropped". Ordering is
//! deliberately not considered: whatever the latest release is, it is the
//! version the binary should run.

use semver::Version;

/// Strip a single optional leading `v`
pub fn normalize(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Whether `current` already matches the latest release tag
///
/// A missing latest release is never up to date.
pub fn is_up_to_date(current: &str, latest: Option<&str>) -> bool {
    match latest {
        Some(latest) => normalize(current) == normalize(latest),
        None => false,
    }
}

/// Whether moving from `current` to `latest` goes backwards in semver order
///
/// Tags that are not valid semver are never reported as downgrades.
pub fn is_downgrade(current: &str, latest: &str) -> bool {
    match (
        Version::parse(normalize(current)),
        Version::parse(normalize(latest)),
    ) {
        (Ok(current), Ok(latest)) => latest < current,
        _ => false,
    }
}
