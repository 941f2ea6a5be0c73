//! The dashboard core: one account's view of the credit registry.
//!
//! [`Dashboard`] ties the registry client and the object store together.
//! Reads degrade instead of failing: an account the registry has never
//! seen renders as a zero state, and a failed secondary fetch drops only
//! the data it would have provided. Writes go through the submission
//! pipeline behind [`Dashboard::submit`], which broadcasts progress events.

pub mod state;

mod submit;

pub use state::{merge_documents, UserState};

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::chain::CreditRegistry;
use crate::config::DashboardConfig;
use crate::document::{DocumentHash, WalletAddress};
use crate::error::{Error, Result};
use crate::event::{
    create_event_channel, DashboardEvent, DashboardEventsChannel, DashboardEventsSender,
};
use crate::storage::StorageClient;

/// Outcome of a completed submission.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    /// Identifier recorded on-chain.
    pub document_hash: DocumentHash,
    /// Key the document was stored under.
    pub storage_key: String,
    /// Public location of the stored document.
    pub location: String,
    /// Hash of the confirmed transaction.
    pub tx_hash: String,
    /// Block the transaction landed in.
    pub block_number: u64,
    /// Account state refetched after the submission settled.
    pub state: UserState,
}

/// Dashboard session for one account.
#[derive(Debug)]
pub struct Dashboard {
    account: WalletAddress,
    registry: CreditRegistry,
    storage: StorageClient,
    events: DashboardEventsSender,
    settle_delay: Duration,
}

impl Dashboard {
    /// Build a session from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the account, chain, or storage configuration
    /// is missing or malformed. No network traffic happens here.
    pub fn connect(config: &DashboardConfig) -> Result<Self> {
        let account = config
            .account
            .as_deref()
            .ok_or_else(|| Error::Config("no account configured".into()))?;
        let account = WalletAddress::parse(account)?;
        let registry = CreditRegistry::new(&config.chain)?;
        let storage = StorageClient::new(&config.storage)?;
        let (events, _) = create_event_channel();

        info!(%account, "dashboard session ready");
        Ok(Self {
            account,
            registry,
            storage,
            events,
            settle_delay: Duration::from_millis(config.chain.settle_delay_ms),
        })
    }

    /// The account this session is for.
    #[must_use]
    pub const fn account(&self) -> &WalletAddress {
        &self.account
    }

    /// The object store this session uploads to.
    #[must_use]
    pub const fn storage(&self) -> &StorageClient {
        &self.storage
    }

    /// Subscribe to submission progress events.
    #[must_use]
    pub fn subscribe(&self) -> DashboardEventsChannel {
        self.events.subscribe()
    }

    /// Verify the account is a participant, not the registry operator.
    ///
    /// # Errors
    ///
    /// Fails when the account is the contract owner, who manages documents
    /// through the validator console rather than this dashboard.
    pub async fn ensure_participant(&self) -> Result<()> {
        let owner = self.registry.owner().await?;
        if owner == self.account {
            return Err(Error::Wallet(format!(
                "{} is the registry operator account, use the validator console instead",
                self.account
            )));
        }
        Ok(())
    }

    /// Fetch the account's credit standing and documents.
    ///
    /// Fetches degrade step by step. An account the registry has never
    /// seen yields the zero state. A failed document fetch yields the
    /// credit standing alone. A failed detail fetch yields documents
    /// without attributes. Only the credit fetch itself can fail.
    pub async fn load(&self) -> Result<UserState> {
        let profile = match self.registry.user_credit(&self.account).await {
            Ok(profile) => profile,
            Err(err) if err.is_user_not_found() => {
                debug!(account = %self.account, "account not yet known to the registry");
                return Ok(UserState::default());
            }
            Err(err) => return Err(err),
        };

        let summaries = match self.registry.user_documents(&self.account).await {
            Ok(summaries) => summaries,
            Err(err) => {
                warn!(%err, "document list unavailable, rendering credit standing alone");
                return Ok(UserState {
                    profile,
                    documents: Vec::new(),
                });
            }
        };

        let details = if summaries.is_empty() {
            None
        } else {
            match self.registry.user_document_details(&self.account).await {
                Ok(details) => Some(details),
                Err(err) => {
                    warn!(%err, "document details unavailable, rendering basic rows");
                    None
                }
            }
        };

        Ok(UserState {
            profile,
            documents: merge_documents(summaries, details),
        })
    }

    /// Broadcast an event, ignoring the send error when nobody listens.
    fn emit(&self, event: DashboardEvent) {
        let _ = self.events.send(event);
    }
}
