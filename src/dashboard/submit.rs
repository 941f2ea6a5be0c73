//! The submission pipeline.
//!
//! Validate, upload, derive the on-chain identifier and attributes, send
//! the transaction, wait for confirmation, then refetch account state.
//! Progress is broadcast as [`DashboardEvent`]s; any failure broadcasts
//! [`DashboardEvent::SubmissionFailed`] before the error is returned.

use chrono::Utc;
use tracing::{debug, info};

use crate::chain::DocumentSubmission;
use crate::document::{DeclaredAttributes, DocumentHash, DocumentType};
use crate::error::Result;
use crate::event::DashboardEvent;
use crate::storage::{validate_file, DocumentFile, StorageClient};

use super::{Dashboard, SubmissionReceipt};

impl Dashboard {
    /// Submit a document end to end.
    ///
    /// The file is validated locally, stored, and recorded on-chain with
    /// placeholder attributes derived from the account and the submission
    /// time. Validators later review the stored document against those
    /// declarations. Returns once the transaction is confirmed and the
    /// account state has been refetched.
    ///
    /// # Errors
    ///
    /// Fails when the file is rejected, the upload fails, the transaction
    /// reverts or times out, or the final refetch fails. The stored object
    /// is not removed on late failures; the validator console reconciles
    /// orphans.
    pub async fn submit(
        &self,
        file: DocumentFile,
        doc_type: DocumentType,
    ) -> Result<SubmissionReceipt> {
        self.emit(DashboardEvent::SubmissionStarted {
            file_name: file.name.clone(),
            doc_type,
        });
        match self.run_submission(file, doc_type).await {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                self.emit(DashboardEvent::SubmissionFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn run_submission(
        &self,
        file: DocumentFile,
        doc_type: DocumentType,
    ) -> Result<SubmissionReceipt> {
        validate_file(&file).into_result()?;
        self.emit(DashboardEvent::DocumentAccepted);

        // One timestamp feeds the storage key, the identifier, and the
        // attribute derivation, so a submission is internally consistent.
        let timestamp_millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();

        let key = StorageClient::submission_key(&self.account, timestamp_millis, &file.name);
        self.emit(DashboardEvent::UploadStarted {
            key: key.clone(),
            bytes: file.size(),
        });
        let location = self
            .storage
            .put_object(&key, file.content.clone(), &file.content_type, &[])
            .await?;
        self.emit(DashboardEvent::UploadComplete {
            location: location.clone(),
        });

        let hash = DocumentHash::submission_identifier(&location, &file.name, timestamp_millis);
        self.emit(DashboardEvent::IdentifierComputed { hash });
        debug!(%hash, key, "document stored, recording on-chain");

        let submission = DocumentSubmission {
            hash,
            doc_type,
            attributes: DeclaredAttributes::derive(&self.account, timestamp_millis),
            authentic: true,
        };
        let pending = self.registry.submit_document(&self.account, &submission).await?;
        self.emit(DashboardEvent::TransactionSubmitted {
            tx_hash: pending.tx_hash.clone(),
        });

        let confirmed = pending.wait().await?;
        self.emit(DashboardEvent::TransactionConfirmed {
            tx_hash: confirmed.tx_hash.clone(),
            block: confirmed.block_number,
        });
        info!(
            %hash,
            tx_hash = confirmed.tx_hash,
            block = confirmed.block_number,
            "document recorded on-chain"
        );

        // Give the node a moment to serve the new state before refetching.
        tokio::time::sleep(self.settle_delay).await;
        let state = self.load().await?;
        self.emit(DashboardEvent::StateRefreshed);

        Ok(SubmissionReceipt {
            document_hash: hash,
            storage_key: key,
            location,
            tx_hash: confirmed.tx_hash,
            block_number: confirmed.block_number,
            state,
        })
    }
}
