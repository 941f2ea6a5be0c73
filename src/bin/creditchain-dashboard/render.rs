//! Plain-text rendering of dashboard state.

use creditchain_dashboard::document::{criteria, DocumentHash, DocumentRecord};
use creditchain_dashboard::{DashboardEvent, UserState};

/// Print the credit standing summary.
pub fn overview(state: &UserState) {
    let profile = &state.profile;
    println!("credit score   {} ({})", profile.score, profile.band());
    println!("validated      {}", profile.validated_documents);
    println!("pending        {}", state.pending_documents());
    println!("documents      {}", state.documents.len());
}

/// Print the document table.
pub fn documents(records: &[DocumentRecord]) {
    if records.is_empty() {
        println!("no documents submitted yet");
        return;
    }
    println!(
        "{:<3} {:<15} {:<19} {:<10} {:<17} {:>7} {:>6} {:>6} {:>8} {:>8}  {}",
        "#",
        "kind",
        "hash",
        "status",
        "submitted",
        "salary",
        "years",
        "repay",
        "balance",
        "utility",
        "authentic"
    );
    for (i, record) in records.iter().enumerate() {
        let attrs = &record.attributes;
        println!(
            "{:<3} {:<15} {:<19} {:<10} {:<17} {:>7} {:>6} {:>6} {:>8} {:>8}  {}",
            i + 1,
            record.doc_type.label(),
            short_hash(&record.hash),
            if record.validated { "validated" } else { "pending" },
            record.submitted_at.format("%Y-%m-%d %H:%M"),
            attrs.salary,
            attrs.employment_years,
            attrs.repayment_score,
            attrs.current_balance,
            attrs.utility_total,
            if record.authentic { "yes" } else { "no" },
        );
    }
}

/// Print what validators review for each document kind.
pub fn criteria_table() {
    for entry in criteria() {
        let required = if entry.required { "required" } else { "optional" };
        println!("{} ({required})", entry.doc_type.label());
        for point in entry.review_points {
            println!("  - {point}");
        }
        println!("  counts toward: {}", entry.contribution);
        println!();
    }
}

/// One line of progress for a submission event.
pub fn event_line(event: &DashboardEvent) -> String {
    match event {
        DashboardEvent::SubmissionStarted {
            file_name,
            doc_type,
        } => format!("submitting {file_name} as {}", doc_type.label()),
        DashboardEvent::DocumentAccepted => "document passed validation".into(),
        DashboardEvent::UploadStarted { key, bytes } => {
            format!("uploading {bytes} bytes as {key}")
        }
        DashboardEvent::UploadComplete { location } => format!("stored at {location}"),
        DashboardEvent::IdentifierComputed { hash } => format!("identifier {hash}"),
        DashboardEvent::TransactionSubmitted { tx_hash } => {
            format!("transaction {tx_hash} submitted, waiting for confirmation")
        }
        DashboardEvent::TransactionConfirmed { tx_hash, block } => {
            format!("transaction {tx_hash} confirmed in block {block}")
        }
        DashboardEvent::StateRefreshed => "account state refreshed".into(),
        DashboardEvent::SubmissionFailed { message } => format!("submission failed: {message}"),
    }
}

fn short_hash(hash: &DocumentHash) -> String {
    let full = hash.to_string();
    format!("{}..{}", &full[..10], &full[full.len() - 6..])
}
