//! Object storage for uploaded documents.
//!
//! Three layers: [`validate`] gates files before any bytes leave the
//! machine, [`sigv4`] produces request signatures and presigned URLs, and
//! [`client`] speaks HTTP to the bucket. Content digests for stored files
//! come from [`crate::document::DocumentHash::of_content`].

pub mod client;
pub mod sigv4;
pub mod validate;

pub use client::StorageClient;
pub use sigv4::Credentials;
pub use validate::{validate_file, DocumentFile, FileVerdict, MAX_DOCUMENT_BYTES};
