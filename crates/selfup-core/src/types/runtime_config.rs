//! Runtime configuration types for operational parameters
//!
//! These types control how the updater talks to the release host and how it
//! treats the installed binary once a new one has been downloaded.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// GitHub repository settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Self-update behaviour
    #[serde(default)]
    pub update: UpdateConfig,
}

impl RuntimeConfig {
    /// Copy of this configuration safe to print (token masked)
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.github.token.is_some() {
            copy.github.token = Some("********".to_string());
        }
        copy
    }
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Timeout for API requests in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Timeout for asset downloads in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            download_timeout_secs: default_download_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_download_timeout() -> u64 {
    300 // 5 minutes
}
fn default_user_agent() -> String {
    format!(
        "selfup/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// GitHub repository settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Repository owner
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// Repository name
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Base URL for the GitHub REST API
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    /// Personal access token, raises the API rate limit and allows private repos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            api_url: default_github_api_url(),
            token: None,
        }
    }
}

fn default_repo_owner() -> String {
    "selfup-rs".to_string()
}
fn default_repo_name() -> String {
    "selfup".to_string()
}
fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Self-update behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateConfig {
    /// Name of the executable inside release archives
    #[serde(default = "default_binary_name")]
    pub binary_name: String,

    /// Run the swapped-in binary once and roll back if it fails
    #[serde(default = "default_verify_after_swap")]
    pub verify_after_swap: bool,

    /// Arguments passed to the new binary for the post-swap check
    #[serde(default = "default_verify_args")]
    pub verify_args: Vec<String>,

    /// Show a progress bar while downloading
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            binary_name: default_binary_name(),
            verify_after_swap: default_verify_after_swap(),
            verify_args: default_verify_args(),
            show_progress: default_show_progress(),
        }
    }
}

fn default_binary_name() -> String {
    "selfup".to_string()
}
fn default_verify_after_swap() -> bool {
    true
}
fn default_verify_args() -> Vec<String> {
    vec!["--version".to_string()]
}
fn default_show_progress() -> bool {
    true
}
