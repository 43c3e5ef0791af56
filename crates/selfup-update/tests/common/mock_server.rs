//! Mock server helpers for GitHub client testing

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::constants::*;

/// Path of the latest-release endpoint for the test repository
pub fn latest_release_path() -> String {
    format!("/repos/{}/{}/releases/latest", OWNER, REPO)
}

/// Path of the asset download endpoint for `id`
pub fn asset_path(id: u64) -> String {
    format!("/repos/{}/{}/releases/assets/{}", OWNER, REPO, id)
}

/// Set up the latest-release endpoint returning `body` as JSON
pub async fn mock_latest_release(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(latest_release_path()))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Set up the latest-release endpoint to fail with `status`
pub async fn mock_latest_release_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(latest_release_path()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Set up an asset download returning `content`
pub async fn mock_asset_download(server: &MockServer, id: u64, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(asset_path(id)))
        .and(header("accept", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

/// Set up an asset download that fails with `status`
pub async fn mock_asset_status(server: &MockServer, id: u64, status: u16) {
    Mock::given(method("GET"))
        .and(path(asset_path(id)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// JSON for a release with `(id, name)` assets, including fields the client ignores
pub fn release_json(tag: &str, assets: &[(u64, &str)]) -> serde_json::Value {
    serde_json::json!({
        "tag_name": tag,
        "name": format!("Release {}", tag),
        "draft": false,
        "prerelease": false,
        "assets": assets
            .iter()
            .map(|(id, name)| serde_json::json!({
                "id": id,
                "name": name,
                "size": 1024,
                "browser_download_url": format!("https://example.com/{}", name),
            }))
            .collect::<Vec<_>>(),
    })
}
