//! Configuration for the CreditChain dashboard.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Wallet account the dashboard acts for, as a `0x` hex address.
    #[serde(default)]
    pub account: Option<String>,

    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chain and registry contract configuration.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// AWS region of the bucket.
    #[serde(default = "default_region")]
    pub region: String,

    /// Bucket holding uploaded documents.
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Custom endpoint for S3-compatible stores. When set, requests use
    /// path-style addressing (`endpoint/bucket/key`); when unset, requests
    /// go to the AWS virtual-hosted endpoint for the region.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access key id. Requests are sent unsigned when credentials are
    /// absent, which suits public development buckets.
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Default lifetime of presigned download URLs in seconds.
    #[serde(default = "default_url_expiry")]
    pub url_expiry_secs: u64,

    /// HTTP timeout for storage requests in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Chain connection and registry contract configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint of a node that manages signing for the configured
    /// account (a local dev node or a wallet-backed provider).
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Address of the credit registry contract.
    #[serde(default)]
    pub contract_address: Option<String>,

    /// Blocks on top of inclusion before a transaction counts as confirmed.
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,

    /// Receipt polling interval in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// How long to wait for confirmation before giving up, in seconds.
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_secs: u64,

    /// Pause between confirmation and the post-submission refetch, in
    /// milliseconds. Gives the node time to index the new state.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// HTTP timeout for RPC requests in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            account: None,
            storage: StorageConfig::default(),
            chain: ChainConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            bucket: default_bucket(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            url_expiry_secs: default_url_expiry(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            contract_address: None,
            confirmations: default_confirmations(),
            poll_interval_ms: default_poll_interval(),
            wait_timeout_secs: default_wait_timeout(),
            settle_delay_ms: default_settle_delay(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket() -> String {
    "credit-chain-documents".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_url_expiry() -> u64 {
    3600 // 1 hour
}

const fn default_timeout() -> u64 {
    30
}

const fn default_confirmations() -> u64 {
    1
}

const fn default_poll_interval() -> u64 {
    1000
}

const fn default_wait_timeout() -> u64 {
    120
}

const fn default_settle_delay() -> u64 {
    1000
}

/// Default location of the config file, under the platform config directory.
#[must_use]
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "creditchain")
        .map(|dirs| dirs.config_dir().join("dashboard.toml"))
        .unwrap_or_else(|| PathBuf::from("creditchain-dashboard.toml"))
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
