//! Typed accessor over the credit registry contract.
//!
//! The contract returns parallel arrays (one per field) rather than arrays
//! of structs. Everything that knows about that layout lives here: callers
//! get typed rows ([`DocumentSummary`], [`DocumentDetail`]) and never touch
//! raw words. Parallel arrays that disagree in length are a decode error.
//!
//! Registry interface:
//!
//! ```solidity
//! function owner() external view returns (address);
//! function getUserCredit(address) external view
//!     returns (uint256 creditScore, uint256 validatedDocs);
//! function getUserDocuments(address) external view returns
//!     (bytes32[] hashes, uint8[] docTypes, bool[] validated, uint256[] submittedAt);
//! function getUserDocumentDetails(address) external view returns
//!     (uint256[] salaries, uint256[] employmentYears, uint256[] repaymentScores,
//!      uint256[] balances, uint256[] utilityTotals, bool[] authenticity,
//!      uint256[] validatedAt);
//! function submitDocumentWithParams(bytes32, uint8, uint256, uint256, uint256,
//!     uint256, uint256, bool) external;
//! ```

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::chain::abi::{CallData, ReturnData};
use crate::chain::rpc::RpcClient;
use crate::config::ChainConfig;
use crate::document::{CreditProfile, DeclaredAttributes, DocumentHash, DocumentType, WalletAddress};
use crate::error::{Error, Result};

const SIG_OWNER: &str = "owner()";
const SIG_USER_CREDIT: &str = "getUserCredit(address)";
const SIG_USER_DOCUMENTS: &str = "getUserDocuments(address)";
const SIG_USER_DOCUMENT_DETAILS: &str = "getUserDocumentDetails(address)";
const SIG_SUBMIT: &str =
    "submitDocumentWithParams(bytes32,uint8,uint256,uint256,uint256,uint256,uint256,bool)";

/// One row of `getUserDocuments`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSummary {
    /// On-chain submission identifier.
    pub hash: DocumentHash,
    /// Document kind.
    pub doc_type: DocumentType,
    /// Whether a validator has accepted the document.
    pub validated: bool,
    /// Submission time as a unix timestamp in seconds.
    pub submitted_at_unix: u64,
}

/// One row of `getUserDocumentDetails`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentDetail {
    /// Declared financial attributes.
    pub attributes: DeclaredAttributes,
    /// Authenticity flag declared at submission.
    pub authentic: bool,
    /// Validation time as a unix timestamp in seconds, zero when pending.
    pub validated_at_unix: u64,
}

/// Arguments of one `submitDocumentWithParams` call.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSubmission {
    /// Submission identifier to record.
    pub hash: DocumentHash,
    /// Document kind.
    pub doc_type: DocumentType,
    /// Declared financial attributes.
    pub attributes: DeclaredAttributes,
    /// Authenticity declaration.
    pub authentic: bool,
}

impl DocumentSubmission {
    /// Encode the call data for this submission.
    #[must_use]
    pub fn calldata(&self) -> String {
        CallData::new(SIG_SUBMIT)
            .push_bytes32(self.hash.as_bytes())
            .push_u64(self.doc_type.code())
            .push_u64(self.attributes.salary)
            .push_u64(self.attributes.employment_years)
            .push_u64(self.attributes.repayment_score)
            .push_u64(self.attributes.current_balance)
            .push_u64(self.attributes.utility_total)
            .push_bool(self.authentic)
            .build()
    }
}

/// Client for one registry contract on one chain.
#[derive(Debug, Clone)]
pub struct CreditRegistry {
    rpc: RpcClient,
    contract: String,
    confirmations: u64,
    poll_interval: Duration,
    wait_timeout: Duration,
}

impl CreditRegistry {
    /// Build a registry client from chain configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the RPC URL or contract address is missing or
    /// malformed.
    pub fn new(config: &ChainConfig) -> Result<Self> {
        let rpc_url = config
            .rpc_url
            .as_deref()
            .ok_or_else(|| Error::Config("chain.rpc_url is not configured".into()))?;
        let contract = config
            .contract_address
            .as_deref()
            .ok_or_else(|| Error::Config("chain.contract_address is not configured".into()))?;
        let contract = WalletAddress::parse(contract)
            .map_err(|_| Error::Config(format!("invalid contract address: {contract}")))?;
        let rpc = RpcClient::new(rpc_url, Duration::from_secs(config.timeout_secs))?;
        Ok(Self {
            rpc,
            contract: contract.to_string(),
            confirmations: config.confirmations,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
        })
    }

    async fn call(&self, data: String) -> Result<ReturnData> {
        let raw = self.rpc.call_contract(&self.contract, &data).await?;
        Ok(ReturnData::from_bytes(raw))
    }

    /// The contract owner, who operates the validator console.
    pub async fn owner(&self) -> Result<WalletAddress> {
        let reader = self.call(CallData::new(SIG_OWNER).build()).await?;
        reader.address_at(0)
    }

    /// Credit standing for an account. Reverts with `User not found` for
    /// accounts that never submitted anything.
    pub async fn user_credit(&self, account: &WalletAddress) -> Result<CreditProfile> {
        let data = CallData::new(SIG_USER_CREDIT).push_address(account).build();
        let reader = self.call(data).await?;
        Ok(CreditProfile {
            score: reader.u64_at(0)?,
            validated_documents: reader.u64_at(1)?,
        })
    }

    /// Submitted documents for an account, without per-document details.
    pub async fn user_documents(&self, account: &WalletAddress) -> Result<Vec<DocumentSummary>> {
        let data = CallData::new(SIG_USER_DOCUMENTS)
            .push_address(account)
            .build();
        let reader = self.call(data).await?;
        decode_documents(&reader)
    }

    /// Declared attributes and validation times, one row per document, in
    /// the same order as [`Self::user_documents`].
    pub async fn user_document_details(
        &self,
        account: &WalletAddress,
    ) -> Result<Vec<DocumentDetail>> {
        let data = CallData::new(SIG_USER_DOCUMENT_DETAILS)
            .push_address(account)
            .build();
        let reader = self.call(data).await?;
        decode_details(&reader)
    }

    /// Record a submission on-chain. Returns a handle to await
    /// confirmation; the transaction is signed by the RPC endpoint.
    pub async fn submit_document(
        &self,
        from: &WalletAddress,
        submission: &DocumentSubmission,
    ) -> Result<PendingSubmission> {
        let tx_hash = self
            .rpc
            .send_transaction(&from.to_string(), &self.contract, &submission.calldata())
            .await?;
        debug!(tx_hash, "submission accepted by node");
        Ok(PendingSubmission {
            rpc: self.rpc.clone(),
            tx_hash,
            confirmations: self.confirmations,
            poll_interval: self.poll_interval,
            timeout: self.wait_timeout,
        })
    }
}

/// A submitted transaction awaiting confirmation.
#[derive(Debug)]
pub struct PendingSubmission {
    rpc: RpcClient,
    /// Hash of the pending transaction.
    pub tx_hash: String,
    confirmations: u64,
    poll_interval: Duration,
    timeout: Duration,
}

impl PendingSubmission {
    /// Poll until the transaction is mined and has the configured number of
    /// confirmations on top of its inclusion block.
    ///
    /// # Errors
    ///
    /// Fails when the transaction reverted on-chain or the timeout elapses
    /// first.
    pub async fn wait(self) -> Result<ConfirmedSubmission> {
        let deadline = Instant::now() + self.timeout;

        let receipt = loop {
            if let Some(receipt) = self.rpc.transaction_receipt(&self.tx_hash).await? {
                break receipt;
            }
            if Instant::now() >= deadline {
                return Err(Error::Transaction(format!(
                    "transaction {} was not mined within {}s",
                    self.tx_hash,
                    self.timeout.as_secs()
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        };

        if !receipt.succeeded {
            return Err(Error::Transaction(format!(
                "transaction {} reverted on-chain",
                self.tx_hash
            )));
        }

        loop {
            let current = self.rpc.block_number().await?;
            if current.saturating_sub(receipt.block_number) >= self.confirmations {
                break;
            }
            if Instant::now() >= deadline {
                return Err(Error::Transaction(format!(
                    "transaction {} did not reach {} confirmations within {}s",
                    self.tx_hash,
                    self.confirmations,
                    self.timeout.as_secs()
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        Ok(ConfirmedSubmission {
            tx_hash: self.tx_hash,
            block_number: receipt.block_number,
        })
    }
}

/// A confirmed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedSubmission {
    /// Transaction hash.
    pub tx_hash: String,
    /// Block the transaction landed in.
    pub block_number: u64,
}

fn decode_documents(reader: &ReturnData) -> Result<Vec<DocumentSummary>> {
    let hashes = reader.bytes32_array_at(0)?;
    let type_codes = reader.u64_array_at(1)?;
    let validated = reader.bool_array_at(2)?;
    let submitted = reader.u64_array_at(3)?;

    if type_codes.len() != hashes.len()
        || validated.len() != hashes.len()
        || submitted.len() != hashes.len()
    {
        return Err(Error::Abi(format!(
            "document arrays disagree in length: {} hashes, {} types, {} flags, {} timestamps",
            hashes.len(),
            type_codes.len(),
            validated.len(),
            submitted.len()
        )));
    }

    hashes
        .into_iter()
        .zip(type_codes)
        .zip(validated)
        .zip(submitted)
        .map(|(((hash, code), validated), submitted_at_unix)| {
            let doc_type = DocumentType::from_code(code)
                .ok_or_else(|| Error::Abi(format!("unknown document type code {code}")))?;
            Ok(DocumentSummary {
                hash,
                doc_type,
                validated,
                submitted_at_unix,
            })
        })
        .collect()
}

fn decode_details(reader: &ReturnData) -> Result<Vec<DocumentDetail>> {
    let salaries = reader.u64_array_at(0)?;
    let employment_years = reader.u64_array_at(1)?;
    let repayment_scores = reader.u64_array_at(2)?;
    let balances = reader.u64_array_at(3)?;
    let utility_totals = reader.u64_array_at(4)?;
    let authenticity = reader.bool_array_at(5)?;
    let validated_at = reader.u64_array_at(6)?;

    let rows = salaries.len();
    if employment_years.len() != rows
        || repayment_scores.len() != rows
        || balances.len() != rows
        || utility_totals.len() != rows
        || authenticity.len() != rows
        || validated_at.len() != rows
    {
        return Err(Error::Abi("detail arrays disagree in length".into()));
    }

    Ok((0..rows)
        .map(|i| DocumentDetail {
            attributes: DeclaredAttributes {
                salary: salaries[i],
                employment_years: employment_years[i],
                repayment_score: repayment_scores[i],
                current_balance: balances[i],
                utility_total: utility_totals[i],
            },
            authentic: authenticity[i],
            validated_at_unix: validated_at[i],
        })
        .collect())
}
