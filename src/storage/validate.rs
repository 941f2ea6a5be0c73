//! Client-side document checks that run before any upload.
//!
//! Validation mirrors what validators will accept: PDF and common image
//! formats up to 10 MiB. Checks run in a fixed order (size, declared type,
//! extension) and the first failure wins, so error messages stay stable for
//! display.

use bytes::Bytes;
use std::path::Path;

use crate::error::{Error, Result};

/// Largest accepted document, 10 MiB.
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

const ALLOWED_TYPES: [&str; 4] = ["application/pdf", "image/jpeg", "image/jpg", "image/png"];
const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// A document staged for upload.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    /// Original file name, kept for storage keys and metadata.
    pub name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Raw file bytes.
    pub content: Bytes,
}

impl DocumentFile {
    /// Build a document from in-memory content.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }

    /// Read a document from disk, inferring the MIME type from the
    /// extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::Validation(format!("path has no file name: {}", path.display()))
            })?;
        let content = tokio::fs::read(path).await?;
        let content_type = content_type_for_name(&name).to_string();
        Ok(Self {
            name,
            content_type,
            content: Bytes::from(content),
        })
    }

    /// Lowercased final extension segment. A name without a dot yields the
    /// whole name, which then fails the extension check.
    #[must_use]
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// MIME type for a file name, by extension.
#[must_use]
pub fn content_type_for_name(name: &str) -> &'static str {
    match name.rsplit('.').next().unwrap_or_default().to_lowercase().as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// Outcome of client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVerdict {
    /// File passed every check.
    Accepted,
    /// File failed a check. The message is suitable for direct display.
    Rejected(String),
}

impl FileVerdict {
    /// True when the file passed.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Rejection message, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(reason),
        }
    }

    /// Convert a rejection into a [`Error::Validation`].
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Accepted => Ok(()),
            Self::Rejected(reason) => Err(Error::Validation(reason)),
        }
    }
}

/// Validate a staged document against the size, type, and extension rules.
#[must_use]
pub fn validate_file(file: &DocumentFile) -> FileVerdict {
    if file.size() > MAX_DOCUMENT_BYTES {
        return FileVerdict::Rejected("File size exceeds 10MB limit".into());
    }

    if !ALLOWED_TYPES.contains(&file.content_type.as_str()) {
        return FileVerdict::Rejected(
            "Invalid file type. Only PDF, JPG, and PNG files are allowed".into(),
        );
    }

    let extension = file.extension();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return FileVerdict::Rejected(
            "Invalid file extension. Only .pdf, .jpg, .jpeg, and .png files are allowed".into(),
        );
    }

    FileVerdict::Accepted
}
