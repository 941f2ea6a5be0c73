//! State loading and its degrade ladder: unknown accounts, partial
//! registry outages, and the operator gate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::stub::{test_config, ChainStub, DetailRow, DocRow, StorageStub, ACCOUNT};
use chrono::{TimeZone, Utc};
use creditchain_dashboard::{Dashboard, DocumentHash, DocumentType, Error, ScoreBand};

async fn dashboard_with(chain: &ChainStub) -> (Dashboard, StorageStub) {
    let storage = StorageStub::start().await;
    let dashboard = Dashboard::connect(&test_config(chain, &storage)).unwrap();
    (dashboard, storage)
}

/// An account the registry has never seen renders the zero state rather
/// than an error.
#[tokio::test]
async fn test_unknown_account_loads_zero_state() {
    let chain = ChainStub::start().await;
    let (dashboard, _storage) = dashboard_with(&chain).await;

    let state = dashboard.load().await.unwrap();
    assert_eq!(state.profile.score, 0);
    assert_eq!(state.profile.validated_documents, 0);
    assert_eq!(state.profile.band(), ScoreBand::Building);
    assert!(state.documents.is_empty());
}

/// The full read path: credit, documents, and details joined per row.
#[tokio::test]
async fn test_load_joins_documents_and_details() {
    let chain = ChainStub::start().await;
    chain.set_credit(720, 1);
    chain.set_documents(vec![
        DocRow {
            hash: DocumentHash::of_content(b"statement"),
            type_code: 0,
            validated: true,
            submitted_at_unix: 1_700_000_000,
        },
        DocRow {
            hash: DocumentHash::of_content(b"bill"),
            type_code: 1,
            validated: false,
            submitted_at_unix: 1_700_000_100,
        },
    ]);
    chain.set_details(vec![
        DetailRow {
            salary: 45_000,
            employment_years: 3,
            repayment_score: 80,
            current_balance: 12_000,
            utility_total: 450,
            authentic: true,
            validated_at_unix: 1_700_050_000,
        },
        DetailRow {
            salary: 52_000,
            employment_years: 7,
            repayment_score: 88,
            current_balance: 30_000,
            utility_total: 900,
            authentic: true,
            validated_at_unix: 0,
        },
    ]);
    let (dashboard, _storage) = dashboard_with(&chain).await;

    let state = dashboard.load().await.unwrap();
    assert_eq!(state.profile.score, 720);
    assert_eq!(state.profile.band(), ScoreBand::Good);
    assert_eq!(state.documents.len(), 2);
    assert_eq!(state.pending_documents(), 1);

    let first = &state.documents[0];
    assert_eq!(first.doc_type, DocumentType::BankStatement);
    assert!(first.validated);
    assert_eq!(first.attributes.salary, 45_000);
    assert_eq!(
        first.submitted_at,
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    );
    assert_eq!(
        first.validated_at,
        Some(Utc.timestamp_opt(1_700_050_000, 0).unwrap())
    );

    let second = &state.documents[1];
    assert_eq!(second.doc_type, DocumentType::UtilityBill);
    assert!(!second.validated);
    assert_eq!(second.attributes.current_balance, 30_000);
    // Zero validation time means still pending.
    assert_eq!(second.validated_at, None);
}

/// A failed document fetch keeps the credit standing.
#[tokio::test]
async fn test_document_fetch_failure_keeps_credit() {
    let chain = ChainStub::start().await;
    chain.set_credit(805, 4);
    chain.fail_documents();
    let (dashboard, _storage) = dashboard_with(&chain).await;

    let state = dashboard.load().await.unwrap();
    assert_eq!(state.profile.score, 805);
    assert_eq!(state.profile.band(), ScoreBand::Excellent);
    assert!(state.documents.is_empty());
}

/// A failed detail fetch renders documents from summaries alone.
#[tokio::test]
async fn test_detail_failure_renders_basic_rows() {
    let chain = ChainStub::start().await;
    chain.set_credit(700, 1);
    chain.set_documents(vec![DocRow {
        hash: DocumentHash::of_content(b"statement"),
        type_code: 0,
        validated: true,
        submitted_at_unix: 1_700_000_000,
    }]);
    chain.fail_details();
    let (dashboard, _storage) = dashboard_with(&chain).await;

    let state = dashboard.load().await.unwrap();
    assert_eq!(state.documents.len(), 1);
    let record = &state.documents[0];
    assert!(record.validated);
    assert_eq!(record.attributes.salary, 0);
    assert!(!record.authentic);
    assert_eq!(record.validated_at, None);
}

/// Details that do not line up with the document list are discarded.
#[tokio::test]
async fn test_detail_length_mismatch_renders_basic_rows() {
    let chain = ChainStub::start().await;
    chain.set_credit(700, 1);
    chain.set_documents(vec![
        DocRow {
            hash: DocumentHash::of_content(b"a"),
            type_code: 0,
            validated: false,
            submitted_at_unix: 1_700_000_000,
        },
        DocRow {
            hash: DocumentHash::of_content(b"b"),
            type_code: 2,
            validated: false,
            submitted_at_unix: 1_700_000_100,
        },
    ]);
    chain.set_details(vec![DetailRow {
        salary: 45_000,
        employment_years: 3,
        repayment_score: 80,
        current_balance: 12_000,
        utility_total: 450,
        authentic: true,
        validated_at_unix: 0,
    }]);
    let (dashboard, _storage) = dashboard_with(&chain).await;

    let state = dashboard.load().await.unwrap();
    assert_eq!(state.documents.len(), 2);
    assert!(state.documents.iter().all(|r| r.attributes.salary == 0));
    assert!(state.documents.iter().all(|r| !r.authentic));
}

/// The operator account is pointed at the validator console.
#[tokio::test]
async fn test_operator_account_is_turned_away() {
    let chain = ChainStub::start().await;
    chain.set_owner(ACCOUNT);
    let (dashboard, _storage) = dashboard_with(&chain).await;

    let err = dashboard.ensure_participant().await.unwrap_err();
    assert!(matches!(err, Error::Wallet(reason) if reason.contains("validator console")));
}

/// A participant account passes the gate.
#[tokio::test]
async fn test_participant_account_passes_gate() {
    let chain = ChainStub::start().await;
    let (dashboard, _storage) = dashboard_with(&chain).await;

    dashboard.ensure_participant().await.unwrap();
}

/// An unreachable node is a hard error, not a degrade.
#[tokio::test]
async fn test_unreachable_node_is_an_error() {
    let chain = ChainStub::start().await;
    let storage = StorageStub::start().await;
    let config = test_config(&chain, &storage);
    drop(chain);

    let dashboard = Dashboard::connect(&config).unwrap();
    let err = dashboard.load().await.unwrap_err();
    assert!(matches!(err, Error::Rpc(_)));
}
