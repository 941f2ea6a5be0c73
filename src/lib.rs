//! Blockchain-backed document credit dashboard.
//!
//! Participants upload supporting documents (bank statements, utility
//! bills, salary slips) to object storage, record a keccak identifier and
//! declared financial attributes on a registry contract, and watch their
//! credit score move as validators accept documents.
//!
//! The crate is a library first: [`Dashboard`] is the high-level session
//! type, with [`chain`] and [`storage`] underneath for callers that need
//! the registry or the object store directly. The `creditchain-dashboard`
//! binary is a thin CLI over [`Dashboard`].

pub mod chain;
pub mod config;
pub mod dashboard;
pub mod document;
pub mod error;
pub mod event;
pub mod storage;

pub use config::{ChainConfig, DashboardConfig, StorageConfig};
pub use dashboard::{Dashboard, SubmissionReceipt, UserState};
pub use document::{
    criteria, CreditProfile, DeclaredAttributes, DocumentHash, DocumentRecord, DocumentType,
    ScoreBand, WalletAddress,
};
pub use error::{Error, Result};
pub use event::{DashboardEvent, DashboardEventsChannel};
pub use storage::{validate_file, DocumentFile, FileVerdict, StorageClient};
