//! Registry contract access.
//!
//! Split in three layers: [`rpc`] speaks JSON-RPC to the node, [`abi`]
//! encodes and decodes call data, and [`registry`] exposes the contract
//! as typed operations on top of both.

pub mod abi;
pub mod registry;
pub mod rpc;

pub use registry::{
    ConfirmedSubmission, CreditRegistry, DocumentDetail, DocumentSubmission, DocumentSummary,
    PendingSubmission,
};
pub use rpc::{RpcClient, TxReceipt};
