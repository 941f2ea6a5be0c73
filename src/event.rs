//! Dashboard event system.
//!
//! Submission is a multi-step pipeline (validate, upload, hash, transact,
//! confirm, refetch). Each step broadcasts an event so front-ends can show
//! progress without polling internal state.

use tokio::sync::broadcast;

use crate::document::{DocumentHash, DocumentType};

/// Events emitted by the dashboard during a submission.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// Submission pipeline has started.
    SubmissionStarted {
        /// Original file name.
        file_name: String,
        /// Declared document kind.
        doc_type: DocumentType,
    },

    /// Document passed client-side validation.
    DocumentAccepted,

    /// Upload to object storage has started.
    UploadStarted {
        /// Storage key the object will land under.
        key: String,
        /// Payload size in bytes.
        bytes: u64,
    },

    /// Upload finished.
    UploadComplete {
        /// Public location of the stored object.
        location: String,
    },

    /// On-chain submission identifier computed.
    IdentifierComputed {
        /// The identifier that will be recorded on-chain.
        hash: DocumentHash,
    },

    /// Transaction accepted by the node and awaiting confirmation.
    TransactionSubmitted {
        /// Transaction hash.
        tx_hash: String,
    },

    /// Transaction confirmed.
    TransactionConfirmed {
        /// Transaction hash.
        tx_hash: String,
        /// Block the transaction landed in.
        block: u64,
    },

    /// Account state refetched after the submission settled.
    StateRefreshed,

    /// Submission aborted. No further events follow.
    SubmissionFailed {
        /// Display-ready failure message.
        message: String,
    },
}

impl DashboardEvent {
    /// True for the two events that end a submission pipeline.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::StateRefreshed | Self::SubmissionFailed { .. })
    }
}

/// Channel for receiving dashboard events.
pub type DashboardEventsChannel = broadcast::Receiver<DashboardEvent>;

/// Sender for dashboard events.
pub type DashboardEventsSender = broadcast::Sender<DashboardEvent>;

/// Create a new event channel pair.
#[must_use]
pub fn create_event_channel() -> (DashboardEventsSender, DashboardEventsChannel) {
    broadcast::channel(256)
}
