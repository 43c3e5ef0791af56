//! Release hosting: the [`ReleaseSource`] seam and its GitHub implementation

use async_trait::async_trait;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use selfup_core::types::RuntimeConfig;
use serde::Deserialize;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, UpdateError};

/// The latest published release of a repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v3.0.0")
    pub tag_name: String,

    /// Release assets, in the order the host lists them
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Release asset as listed by the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    /// Host-assigned asset identifier
    pub id: u64,

    /// Asset file name
    pub name: String,
}

/// Where releases and their assets come from
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the latest published release
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release>;

    /// Stream an asset's bytes into `sink`, returning the number written
    async fn download_asset(
        &self,
        owner: &str,
        repo: &str,
        asset_id: u64,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64>;
}

#[async_trait]
impl<T: ReleaseSource + ?Sized> ReleaseSource for Arc<T> {
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release> {
        (**self).latest_release(owner, repo).await
    }

    async fn download_asset(
        &self,
        owner: &str,
        repo: &str,
        asset_id: u64,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64> {
        (**self).download_asset(owner, repo, asset_id, sink).await
    }
}

/// GitHub Releases REST client
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    api_timeout: Duration,
    download_timeout: Duration,
    show_progress: bool,
}

impl GitHubReleases {
    /// Client for `api_url` with default network settings
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let mut config = RuntimeConfig::default();
        config.github.api_url = api_url.into();
        Self::from_config(&config)
    }

    /// Client configured from the runtime configuration
    ///
    /// Picks up the API URL, token, user agent and both timeouts.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.network.user_agent)
            .connect_timeout(Duration::from_secs(config.network.http_timeout_secs))
            .build()
            .map_err(|e| UpdateError::network("creating HTTP client", e))?;

        Ok(Self {
            client,
            api_url: config.github.api_url.trim_end_matches('/').to_string(),
            token: config.github.token.clone(),
            api_timeout: Duration::from_secs(config.network.http_timeout_secs),
            download_timeout: Duration::from_secs(config.network.download_timeout_secs),
            show_progress: false,
        })
    }

    /// Authenticate requests with a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Enable or disable the download progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn get(&self, url: &str, accept: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url).header(ACCEPT, accept);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    fn progress_bar(&self, total: Option<u64>) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = match total {
            Some(total) => {
                let pb = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                ) {
                    pb.set_style(style.progress_chars("#>-"));
                }
                pb
            }
            None => ProgressBar::new_spinner(),
        };
        Some(pb)
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release> {
        const OPERATION: &str = "fetching latest release";

        let url = format!("{}/repos/{}/{}/releases/latest", self.api_url, owner, repo);
        debug!("Fetching latest release from: {}", url);

        let response = self
            .get(&url, "application/vnd.github+json")
            .timeout(self.api_timeout)
            .send()
            .await
            .map_err(|e| UpdateError::network(OPERATION, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(UpdateError::network(
                OPERATION,
                format!("no published release for {}/{}", owner, repo),
            ));
        }
        if !status.is_success() {
            return Err(UpdateError::network(OPERATION, format!("{} returned {}", url, status)));
        }

        response
            .json::<Release>()
            .await
            .map_err(|e| UpdateError::network(OPERATION, e))
    }

    async fn download_asset(
        &self,
        owner: &str,
        repo: &str,
        asset_id: u64,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64> {
        const OPERATION: &str = "downloading release asset";

        let url = format!(
            "{}/repos/{}/{}/releases/assets/{}",
            self.api_url, owner, repo, asset_id
        );
        debug!("Downloading asset from: {}", url);

        let response = self
            .get(&url, "application/octet-stream")
            .timeout(self.download_timeout)
            .send()
            .await
            .map_err(|e| UpdateError::network(OPERATION, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::network(OPERATION, format!("{} returned {}", url, status)));
        }

        let progress = self.progress_bar(response.content_length());
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| UpdateError::network(OPERATION, e))?;
            sink.write_all(&chunk)
                .map_err(|e| UpdateError::io("failed to write downloaded asset", e))?;
            downloaded += chunk.len() as u64;

            if let Some(pb) = &progress {
                pb.set_position(downloaded);
            }
        }

        sink.flush()
            .map_err(|e| UpdateError::io("failed to write downloaded asset", e))?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        debug!(bytes = downloaded, asset_id, "asset downloaded");
        Ok(downloaded)
    }
}
