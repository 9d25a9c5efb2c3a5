//! Workflow Integration Tests
//!
//! StorageWorkflow の統合テスト（ネットワーク呼び出し前に終わる経路のみ）

use std::fs;
use std::path::Path;

use chunkup::adapter::config::{Config, ConfigError};
use chunkup::domain::entities::stored_file::ImageOperation;
use chunkup::domain::errors::UploadError;
use chunkup::driver::cli::{Args, Command, UploadMode};
use chunkup::driver::workflow::StorageWorkflow;
use clap::Parser;
use tempfile::TempDir;

/// 到達できないAPIを指すConfigファイルを作成
fn create_test_config(dir: &Path) -> String {
    let config_path = dir.join("chunkup.json");
    let config_content = r#"{
  "api_base_url": "http://127.0.0.1:9",
  "timeout_ms": 1000,
  "chunk_size": 1024,
  "max_file_size": 16
}"#;
    fs::write(&config_path, config_content).unwrap();
    config_path.to_string_lossy().to_string()
}

fn load_workflow(dir: &Path) -> StorageWorkflow {
    let config = Config::load(&create_test_config(dir)).unwrap();
    StorageWorkflow::new(config).unwrap()
}

#[test]
fn test_config_file_and_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path());

    let config = Config::load(&config_path)
        .unwrap()
        .apply_overrides(|name| match name {
            "CHUNKUP_TIMEOUT_MS" => Some("2500".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.api_base_url, "http://127.0.0.1:9");
    assert_eq!(config.chunk_size, 1024);
    assert_eq!(config.timeout_ms, 2500);
    assert_eq!(config.max_file_size, 16);
}

#[test]
fn test_config_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("chunkup.json");
    fs::write(&config_path, r#"{"chunk_size": "big"}"#).unwrap();

    let err = Config::load(config_path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[tokio::test]
async fn test_multipart_upload_of_empty_file_fails_before_network() {
    let temp_dir = TempDir::new().unwrap();
    let workflow = load_workflow(temp_dir.path());

    let empty = temp_dir.path().join("empty.txt");
    fs::write(&empty, b"").unwrap();

    let err = workflow
        .execute(Command::Upload {
            path: empty,
            mode: UploadMode::Multipart,
            chunk_size: None,
            quiet: true,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<UploadError>(),
        Some(UploadError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_simple_upload_over_limit_fails_before_network() {
    let temp_dir = TempDir::new().unwrap();
    let workflow = load_workflow(temp_dir.path());

    let large = temp_dir.path().join("large.bin");
    fs::write(&large, vec![0u8; 32]).unwrap();

    let err = workflow
        .execute(Command::Upload {
            path: large,
            mode: UploadMode::Simple,
            chunk_size: None,
            quiet: true,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<UploadError>(),
        Some(UploadError::FileTooLarge { size: 32, limit: 16 })
    ));
}

#[tokio::test]
async fn test_multipart_upload_over_limit_fails_before_network() {
    let temp_dir = TempDir::new().unwrap();
    let workflow = load_workflow(temp_dir.path());

    let large = temp_dir.path().join("large.iso");
    fs::write(&large, vec![0u8; 17]).unwrap();

    let err = workflow
        .execute(Command::Upload {
            path: large,
            mode: UploadMode::Multipart,
            chunk_size: Some(4),
            quiet: true,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<UploadError>(),
        Some(UploadError::FileTooLarge { size: 17, limit: 16 })
    ));
}

#[test]
fn test_default_size_limit_is_500_megabytes() {
    assert_eq!(Config::default().max_file_size, 524_288_000);
}

#[tokio::test]
async fn test_upload_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let workflow = load_workflow(temp_dir.path());

    let args = Args::parse_from([
        "chunkup",
        "upload",
        temp_dir.path().join("missing.bin").to_str().unwrap(),
    ]);

    assert!(workflow.execute(args.command).await.is_err());
}

#[tokio::test]
async fn test_process_image_with_invalid_params() {
    let temp_dir = TempDir::new().unwrap();
    let workflow = load_workflow(temp_dir.path());

    let err = workflow
        .execute(Command::ProcessImage {
            file_id: "img-1".to_string(),
            operation: ImageOperation::Compress,
            params: "not json".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid --params JSON"));
}
