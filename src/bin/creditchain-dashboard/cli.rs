//! Command-line interface definition.

use clap::{Parser, Subcommand, ValueEnum};
use creditchain_dashboard::config::{default_config_path, DashboardConfig};
use creditchain_dashboard::document::DocumentType;
use std::path::PathBuf;

/// Document credit dashboard for the registry chain.
#[derive(Parser, Debug)]
#[command(name = "creditchain-dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Wallet address to act as.
    #[arg(long, short, env = "CREDITCHAIN_ACCOUNT")]
    pub account: Option<String>,

    /// JSON-RPC endpoint of a node that signs for the account.
    #[arg(long, env = "CREDITCHAIN_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Registry contract address.
    #[arg(long, env = "CREDITCHAIN_CONTRACT")]
    pub contract: Option<String>,

    /// Object storage region.
    #[arg(long, env = "CREDITCHAIN_REGION")]
    pub region: Option<String>,

    /// Object storage bucket.
    #[arg(long, env = "CREDITCHAIN_BUCKET")]
    pub bucket: Option<String>,

    /// Custom storage endpoint, for S3-compatible stores.
    #[arg(long, env = "CREDITCHAIN_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Storage access key id.
    #[arg(long, env = "CREDITCHAIN_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// Storage secret access key.
    #[arg(long, env = "CREDITCHAIN_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Log level.
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Path to configuration file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Dashboard operations.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the account's credit standing.
    Status,

    /// List submitted documents and their declared attributes.
    Documents,

    /// Submit a document: upload, record on-chain, wait for confirmation.
    Submit {
        /// Path of the file to submit.
        file: PathBuf,

        /// Document kind being submitted.
        #[arg(long, value_enum)]
        doc_type: CliDocumentType,
    },

    /// Show what validators review for each document kind.
    Criteria,

    /// Print a presigned download URL for a stored object.
    Url {
        /// Storage key of the object.
        key: String,

        /// Expiry in seconds (the configured default when omitted).
        #[arg(long)]
        expires_secs: Option<u64>,
    },

    /// Delete a stored object.
    Rm {
        /// Storage key of the object.
        key: String,
    },
}

/// Document kind CLI enum.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliDocumentType {
    /// Bank statement.
    BankStatement,
    /// Utility bill.
    UtilityBill,
    /// Salary slip.
    SalarySlip,
}

impl Cli {
    /// Convert CLI arguments into a DashboardConfig plus the command to run.
    ///
    /// Loads the file given with `--config`, otherwise the default config
    /// path when a file exists there, otherwise built-in defaults. CLI
    /// arguments override file values either way.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is specified but cannot be loaded.
    pub fn into_parts(self) -> color_eyre::Result<(DashboardConfig, Command)> {
        // Start with default config or load from file
        let mut config = if let Some(ref path) = self.config {
            DashboardConfig::from_file(path)?
        } else {
            let path = default_config_path();
            if path.exists() {
                DashboardConfig::from_file(&path)?
            } else {
                DashboardConfig::default()
            }
        };

        // Override with CLI arguments
        if let Some(account) = self.account {
            config.account = Some(account);
        }
        if let Some(rpc_url) = self.rpc_url {
            config.chain.rpc_url = Some(rpc_url);
        }
        if let Some(contract) = self.contract {
            config.chain.contract_address = Some(contract);
        }
        if let Some(region) = self.region {
            config.storage.region = region;
        }
        if let Some(bucket) = self.bucket {
            config.storage.bucket = bucket;
        }
        if let Some(endpoint) = self.endpoint {
            config.storage.endpoint = Some(endpoint);
        }
        if let Some(access_key_id) = self.access_key_id {
            config.storage.access_key_id = Some(access_key_id);
        }
        if let Some(secret_access_key) = self.secret_access_key {
            config.storage.secret_access_key = Some(secret_access_key);
        }
        config.log_level = self.log_level;

        Ok((config, self.command))
    }
}

impl From<CliDocumentType> for DocumentType {
    fn from(t: CliDocumentType) -> Self {
        match t {
            CliDocumentType::BankStatement => DocumentType::BankStatement,
            CliDocumentType::UtilityBill => DocumentType::UtilityBill,
            CliDocumentType::SalarySlip => DocumentType::SalarySlip,
        }
    }
}
