//! View state assembled from registry reads.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::chain::{DocumentDetail, DocumentSummary};
use crate::document::{CreditProfile, DeclaredAttributes, DocumentRecord};

/// Everything the dashboard shows for one account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    /// Credit standing. Zeroed for accounts the registry does not know.
    pub profile: CreditProfile,
    /// Submitted documents, oldest first, as returned by the registry.
    pub documents: Vec<DocumentRecord>,
}

impl UserState {
    /// Documents still awaiting validator review.
    #[must_use]
    pub fn pending_documents(&self) -> usize {
        self.documents.iter().filter(|d| !d.validated).count()
    }
}

/// Join document summaries with their detail rows.
///
/// Details are positional: row `i` of the detail arrays describes document
/// `i`. When the detail fetch failed, or returned a different number of
/// rows than the document list, every document is rendered from its summary
/// alone with zeroed attributes.
#[must_use]
pub fn merge_documents(
    summaries: Vec<DocumentSummary>,
    details: Option<Vec<DocumentDetail>>,
) -> Vec<DocumentRecord> {
    let details = match details {
        Some(details) if details.len() == summaries.len() => Some(details),
        Some(details) => {
            warn!(
                documents = summaries.len(),
                details = details.len(),
                "detail rows do not line up with documents, rendering basic rows"
            );
            None
        }
        None => None,
    };

    let Some(details) = details else {
        return summaries.into_iter().map(basic_record).collect();
    };

    summaries
        .into_iter()
        .zip(details)
        .map(|(summary, detail)| DocumentRecord {
            hash: summary.hash,
            doc_type: summary.doc_type,
            attributes: detail.attributes,
            authentic: detail.authentic,
            validated: summary.validated,
            submitted_at: datetime_from_unix(summary.submitted_at_unix),
            validated_at: (detail.validated_at_unix > 0)
                .then(|| datetime_from_unix(detail.validated_at_unix)),
        })
        .collect()
}

fn basic_record(summary: DocumentSummary) -> DocumentRecord {
    DocumentRecord {
        hash: summary.hash,
        doc_type: summary.doc_type,
        attributes: DeclaredAttributes::default(),
        authentic: false,
        validated: summary.validated,
        submitted_at: datetime_from_unix(summary.submitted_at_unix),
        validated_at: None,
    }
}

/// Unix seconds to a UTC datetime, clamping anything unrepresentable to
/// the epoch rather than failing a whole page render.
pub(crate) fn datetime_from_unix(secs: u64) -> DateTime<Utc> {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::UNIX_EPOCH)
}
