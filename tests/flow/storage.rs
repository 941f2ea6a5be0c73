//! Storage client flows against the stub bucket: uploads with metadata,
//! presigned downloads, deletes, and unsigned operation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use crate::stub::{storage_config, StorageStub, ACCOUNT};
use creditchain_dashboard::{
    DocumentFile, DocumentHash, DocumentType, Error, StorageClient, WalletAddress,
};

/// Document uploads land under the deterministic key with full metadata.
#[tokio::test]
async fn test_upload_document_carries_metadata() {
    let storage = StorageStub::start().await;
    let client = StorageClient::new(&storage_config(&storage)).unwrap();

    let account = WalletAddress::parse(ACCOUNT).unwrap();
    let content = vec![1, 2, 3];
    let hash = DocumentHash::of_content(&content);
    let file = DocumentFile::new("bank statement.pdf", "application/pdf", content);

    let key = client
        .upload_document(&file, &account, &hash, DocumentType::BankStatement)
        .await
        .unwrap();
    assert_eq!(key, format!("users/{account}/{hash}/{hash}.pdf"));

    let objects = storage.objects();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].path, format!("docs/{key}"));

    let metadata: HashMap<String, String> = objects[0].metadata.iter().cloned().collect();
    assert_eq!(metadata["walletaddress"], account.to_string());
    assert_eq!(metadata["dochash"], hash.to_string());
    assert_eq!(metadata["doctype"], "0");
    assert_eq!(metadata["originalfilename"], "bank statement.pdf");
    // RFC 3339 with millisecond precision, UTC.
    let uploaded_at = &metadata["uploadedat"];
    assert!(uploaded_at.ends_with('Z'));
    assert!(uploaded_at.contains('.'));
}

/// A presigned URL fetches the stored content without credentials on the
/// request itself.
#[tokio::test]
async fn test_presigned_url_serves_content() {
    let storage = StorageStub::start().await;
    let client = StorageClient::new(&storage_config(&storage)).unwrap();

    let content: Vec<u8> = (0..64).map(|_| rand::random()).collect();
    client
        .put_object(
            "users/a/report.pdf",
            content.clone().into(),
            "application/pdf",
            &[],
        )
        .await
        .unwrap();

    let url = client.presigned_url("users/a/report.pdf", None).unwrap();
    assert!(url.contains("X-Amz-Expires=3600"));
    assert!(url.contains("X-Amz-Signature="));

    let body = reqwest::get(&url).await.unwrap().bytes().await.unwrap();
    assert_eq!(&body[..], &content[..]);

    let short = client.presigned_url("users/a/report.pdf", Some(60)).unwrap();
    assert!(short.contains("X-Amz-Expires=60"));
}

/// Deletes hit the bucket under the same path uploads used.
#[tokio::test]
async fn test_delete_document_issues_delete() {
    let storage = StorageStub::start().await;
    let client = StorageClient::new(&storage_config(&storage)).unwrap();

    client.delete_document("users/a/report.pdf").await.unwrap();
    assert_eq!(storage.deletes(), vec!["docs/users/a/report.pdf".to_string()]);
}

/// Without credentials uploads still work, just unsigned.
#[tokio::test]
async fn test_unsigned_upload_without_credentials() {
    let storage = StorageStub::start().await;
    let mut config = storage_config(&storage);
    config.access_key_id = None;
    config.secret_access_key = None;
    let client = StorageClient::new(&config).unwrap();

    client
        .put_object("plain.pdf", vec![7].into(), "application/pdf", &[])
        .await
        .unwrap();

    let objects = storage.objects();
    assert_eq!(objects.len(), 1);
    assert!(objects[0].authorization.is_none());
}

/// Presigning without credentials is a configuration error, and an empty
/// key is rejected before any signing happens.
#[tokio::test]
async fn test_presign_requires_credentials_and_key() {
    let storage = StorageStub::start().await;

    let mut config = storage_config(&storage);
    config.access_key_id = None;
    config.secret_access_key = None;
    let unsigned = StorageClient::new(&config).unwrap();
    assert!(matches!(
        unsigned.presigned_url("users/a/report.pdf", None),
        Err(Error::Config(_))
    ));

    let signed = StorageClient::new(&storage_config(&storage)).unwrap();
    assert!(matches!(
        signed.presigned_url("", None),
        Err(Error::Storage(reason)) if reason.contains("key is required")
    ));
}
