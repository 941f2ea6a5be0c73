//! Submission pipeline flows: what lands in the bucket, what lands
//! on-chain, and which events fire, for both the happy path and each
//! abort point.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::stub::{test_config, ChainStub, StorageStub, ACCOUNT};
use creditchain_dashboard::chain::abi;
use creditchain_dashboard::{
    Dashboard, DashboardEvent, DashboardEventsChannel, DeclaredAttributes, DocumentFile,
    DocumentHash, DocumentType, Error, WalletAddress,
};

const SUBMIT_SIG: &str =
    "submitDocumentWithParams(bytes32,uint8,uint256,uint256,uint256,uint256,uint256,bool)";

/// Collect buffered events up to and including the terminal one.
async fn drain(events: &mut DashboardEventsChannel) -> Vec<DashboardEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.recv().await {
        let terminal = event.is_terminal();
        seen.push(event);
        if terminal {
            break;
        }
    }
    seen
}

/// The full happy path: upload, transaction, confirmation, refetch.
#[tokio::test]
async fn test_submit_records_storage_and_chain() {
    let storage = StorageStub::start().await;
    let chain = ChainStub::start().await;
    chain.set_credit(650, 1);

    let dashboard = Dashboard::connect(&test_config(&chain, &storage)).unwrap();
    dashboard.ensure_participant().await.unwrap();
    let mut events = dashboard.subscribe();

    let file = DocumentFile::new("statement.pdf", "application/pdf", vec![0x25, 0x50, 0x44, 0x46]);
    let receipt = dashboard
        .submit(file, DocumentType::BankStatement)
        .await
        .unwrap();

    // The object landed in the bucket under the submission key, signed.
    let objects = storage.objects();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].path, format!("docs/{}", receipt.storage_key));
    assert_eq!(objects[0].content_type.as_deref(), Some("application/pdf"));
    assert_eq!(objects[0].body, vec![0x25, 0x50, 0x44, 0x46]);
    assert!(objects[0]
        .authorization
        .as_deref()
        .unwrap()
        .starts_with("AWS4-HMAC-SHA256"));

    // Key shape: account prefix, timestamp, original name.
    assert!(receipt.storage_key.starts_with("01020304_"));
    assert!(receipt.storage_key.ends_with("_statement.pdf"));
    let timestamp: u64 = receipt
        .storage_key
        .split('_')
        .nth(1)
        .unwrap()
        .parse()
        .unwrap();

    // The transaction carried the full submission calldata.
    let txs = chain.transactions();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].from, ACCOUNT);
    assert!(txs[0]
        .data
        .starts_with(&format!("0x{}", hex::encode(abi::selector(SUBMIT_SIG)))));

    let words = abi::ReturnData::from_hex(&txs[0].data[10..]).unwrap();
    assert_eq!(words.bytes32_at(0).unwrap(), receipt.document_hash);
    assert_eq!(words.u64_at(1).unwrap(), DocumentType::BankStatement.code());

    let account = WalletAddress::parse(ACCOUNT).unwrap();
    let expected = DeclaredAttributes::derive(&account, timestamp);
    assert_eq!(words.u64_at(2).unwrap(), expected.salary);
    assert_eq!(words.u64_at(3).unwrap(), expected.employment_years);
    assert_eq!(words.u64_at(4).unwrap(), expected.repayment_score);
    assert_eq!(words.u64_at(5).unwrap(), expected.current_balance);
    assert_eq!(words.u64_at(6).unwrap(), expected.utility_total);
    assert!(words.bool_at(7).unwrap());

    // The identifier binds the stored location, the name, and the time.
    assert_eq!(
        receipt.document_hash,
        DocumentHash::submission_identifier(&receipt.location, "statement.pdf", timestamp)
    );

    // State was refetched after confirmation.
    assert_eq!(receipt.state.profile.score, 650);
    assert!(receipt.block_number > 0);

    let seen = drain(&mut events).await;
    assert_eq!(seen.len(), 8);
    assert!(matches!(seen[0], DashboardEvent::SubmissionStarted { .. }));
    assert!(matches!(seen[1], DashboardEvent::DocumentAccepted));
    assert!(matches!(seen[2], DashboardEvent::UploadStarted { .. }));
    assert!(matches!(seen[3], DashboardEvent::UploadComplete { .. }));
    assert!(matches!(seen[4], DashboardEvent::IdentifierComputed { .. }));
    assert!(matches!(seen[5], DashboardEvent::TransactionSubmitted { .. }));
    assert!(matches!(seen[6], DashboardEvent::TransactionConfirmed { .. }));
    assert!(matches!(seen[7], DashboardEvent::StateRefreshed));
}

/// A rejected file never touches either network boundary.
#[tokio::test]
async fn test_rejected_file_never_reaches_network() {
    let storage = StorageStub::start().await;
    let chain = ChainStub::start().await;

    let dashboard = Dashboard::connect(&test_config(&chain, &storage)).unwrap();
    let mut events = dashboard.subscribe();

    let file = DocumentFile::new("statement.gif", "image/gif", vec![1]);
    let err = dashboard
        .submit(file, DocumentType::BankStatement)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(storage.objects().is_empty());
    assert!(chain.transactions().is_empty());

    let seen = drain(&mut events).await;
    assert_eq!(seen.len(), 2);
    assert!(matches!(seen[0], DashboardEvent::SubmissionStarted { .. }));
    assert!(matches!(seen[1], DashboardEvent::SubmissionFailed { .. }));
}

/// An upload failure aborts the pipeline before anything goes on-chain.
#[tokio::test]
async fn test_upload_failure_stops_before_chain() {
    let storage = StorageStub::start().await;
    let chain = ChainStub::start().await;
    storage.fail_puts();

    let dashboard = Dashboard::connect(&test_config(&chain, &storage)).unwrap();
    let mut events = dashboard.subscribe();

    let file = DocumentFile::new("bill.png", "image/png", vec![2, 3]);
    let err = dashboard
        .submit(file, DocumentType::UtilityBill)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upload(_)));
    assert!(chain.transactions().is_empty());

    let seen = drain(&mut events).await;
    assert!(matches!(
        seen.last(),
        Some(DashboardEvent::SubmissionFailed { .. })
    ));
}

/// An on-chain revert after a successful upload surfaces as a transaction
/// error; the uploaded object stays for later reconciliation.
#[tokio::test]
async fn test_reverted_transaction_surfaces() {
    let storage = StorageStub::start().await;
    let chain = ChainStub::start().await;
    chain.revert_transactions();

    let dashboard = Dashboard::connect(&test_config(&chain, &storage)).unwrap();
    let mut events = dashboard.subscribe();

    let file = DocumentFile::new("slip.jpg", "image/jpeg", vec![4]);
    let err = dashboard
        .submit(file, DocumentType::SalarySlip)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transaction(reason) if reason.contains("reverted")));
    assert_eq!(storage.objects().len(), 1);

    let seen = drain(&mut events).await;
    assert!(matches!(
        seen.last(),
        Some(DashboardEvent::SubmissionFailed { .. })
    ));
}
