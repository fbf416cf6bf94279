use std::path::PathBuf;

use super::*;

fn test_client() -> CatalogClient {
    CatalogClient::new(5, "arise-test/0.1", 0, 0).expect("failed to build test CatalogClient")
}

/// A fresh directory under the system temp dir, unique per test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("arise-client-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn file_source(path: PathBuf) -> CatalogSource {
    CatalogSource::new("men", SourceLocation::File(path))
}

#[tokio::test]
async fn fetch_document_reads_array_file() {
    let dir = scratch_dir("array");
    let path = dir.join("products.json");
    std::fs::write(&path, r#"[{"name":"A"},{"name":"B"}]"#).unwrap();

    let records = test_client().fetch_document(&file_source(path)).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn fetch_document_reads_wrapped_file() {
    let dir = scratch_dir("wrapped");
    let path = dir.join("products.json");
    std::fs::write(&path, r#"{"products":[{"name":"A"}]}"#).unwrap();

    let records = test_client().fetch_document(&file_source(path)).await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn fetch_document_missing_file_is_io_error() {
    let dir = scratch_dir("missing");
    let err = test_client()
        .fetch_document(&file_source(dir.join("nope.json")))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }), "got: {err:?}");
}

#[tokio::test]
async fn fetch_document_malformed_file_is_deserialize_error() {
    let dir = scratch_dir("malformed");
    let path = dir.join("products.json");
    std::fs::write(&path, "[{").unwrap();

    let err = test_client()
        .fetch_document(&file_source(path))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Deserialize { .. }), "got: {err:?}");
}
