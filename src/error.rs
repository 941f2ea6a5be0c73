//! Error types for the CreditChain dashboard.
//!
//! Every fallible operation in the crate returns [`Result`]. Variants are
//! grouped by boundary: configuration and wallet checks happen before any
//! network traffic, storage variants cover the S3 side, and the chain
//! variants distinguish transport failures from contract-level reverts so
//! callers can react to each differently.

/// Result alias used throughout the dashboard.
pub type Result<T> = std::result::Result<T, Error>;

/// Dashboard error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wallet account is missing, malformed, or not permitted here.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// Document failed client-side validation. The message is suitable for
    /// direct display.
    #[error("document rejected: {0}")]
    Validation(String),

    /// Upload to object storage failed.
    #[error("upload failed: {0}")]
    Upload(String),

    /// Object storage operation (presign, delete, fetch) failed.
    #[error("object store error: {0}")]
    Storage(String),

    /// JSON-RPC transport failure (connection, timeout, malformed response).
    #[error("rpc error: {0}")]
    Rpc(String),

    /// Contract return data could not be decoded.
    #[error("abi decode error: {0}")]
    Abi(String),

    /// Contract call reverted. The payload is the revert reason reported by
    /// the node, with any `execution reverted:` prefix stripped.
    #[error("contract reverted: {0}")]
    Revert(String),

    /// Transaction was rejected, reverted on-chain, or never confirmed.
    #[error("transaction failed: {0}")]
    Transaction(String),

    /// Filesystem I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the error is the registry's way of saying the account has
    /// no credit profile yet. Callers treat this as an empty state, not a
    /// failure.
    #[must_use]
    pub fn is_user_not_found(&self) -> bool {
        match self {
            Self::Revert(reason) | Self::Rpc(reason) => reason.contains("User not found"),
            _ => false,
        }
    }
}
