//! Release asset resolution
//!
//! Turns the raw release listing into candidate assets carrying their
//! published checksums, then picks the one for the host platform.

use tracing::{debug, warn};

use crate::error::{Result, UpdateError};
use crate::manifest::ChecksumManifest;
use crate::platform::Platform;
use crate::releases::{Release, ReleaseSource};

/// Substring that marks a release asset as a checksum manifest
const CHECKSUM_MARKER: &str = "checksums";

/// A downloadable release asset with its published checksum
///
/// `checksum` is empty when no manifest lists the asset; such an asset can
/// never pass verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    pub checksum: String,
}

/// Collect candidate assets and attach checksums from the release manifests
///
/// Every asset whose name contains `checksums` is downloaded and parsed;
/// several manifests are merged in release order with later entries winning.
/// The remaining assets become candidates in their original order.
pub async fn fetch_assets<S>(source: &S, owner: &str, repo: &str, release: &Release) -> Result<Vec<Asset>>
where
    S: ReleaseSource + ?Sized,
{
    let mut manifest: Option<ChecksumManifest> = None;
    let mut candidates = Vec::with_capacity(release.assets.len());

    for asset in &release.assets {
        if !asset.name.contains(CHECKSUM_MARKER) {
            candidates.push(asset);
            continue;
        }

        debug!(asset = %asset.name, "downloading checksum manifest");
        let mut buffer = Vec::new();
        source
            .download_asset(owner, repo, asset.id, &mut buffer)
            .await?;

        let text = String::from_utf8(buffer).map_err(|e| {
            UpdateError::network(
                "downloading checksum manifest",
                format!("could not read checksum manifest {}: {}", asset.name, e),
            )
        })?;

        let parsed = ChecksumManifest::parse(&text);
        debug!(asset = %asset.name, entries = parsed.len(), "parsed checksum manifest");
        manifest = Some(match manifest {
            Some(existing) => existing.merged(parsed),
            None => parsed,
        });
    }

    let manifest = manifest.unwrap_or_else(|| {
        warn!(
            tag = %release.tag_name,
            "release has no checksum manifest; assets cannot be verified"
        );
        ChecksumManifest::default()
    });

    Ok(candidates
        .into_iter()
        .map(|asset| Asset {
            id: asset.id,
            name: asset.name.clone(),
            checksum: manifest.get(&asset.name).unwrap_or_default().to_string(),
        })
        .collect())
}

/// Archive name published for `binary_name` on `platform`
pub fn expected_asset_name(binary_name: &str, platform: &Platform) -> String {
    format!("{}_{}.tar.gz", binary_name, platform.label())
}

/// Pick the asset whose name exactly matches the platform convention
pub fn select_asset<'a>(assets: &'a [Asset], binary_name: &str, platform: &Platform) -> Result<&'a Asset> {
    let expected = expected_asset_name(binary_name, platform);

    assets
        .iter()
        .find(|asset| asset.name == expected)
        .ok_or(UpdateError::AssetNotFound { expected })
}
