//! Workflow Orchestration
//!
//! コマンドごとのワークフロー（依存関係の組み立てと結果表示）

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::adapter::config::Config;
use crate::adapter::http::client::ApiClient;
use crate::adapter::progress::{ConsoleProgress, LogProgress};
use crate::adapter::repositories::http_processing_repository::HttpProcessingRepository;
use crate::adapter::repositories::http_storage_repository::HttpStorageRepository;
use crate::adapter::source::local_file::LocalFileSource;
use crate::application::dto::upload_config::SingleUploadMode;
use crate::application::use_cases::chunked_upload::ChunkedUploadUseCase;
use crate::application::use_cases::manage_files::ManageFilesUseCase;
use crate::application::use_cases::process_file::ProcessFileUseCase;
use crate::application::use_cases::simple_upload::SimpleUploadUseCase;
use crate::domain::errors::UploadError;
use crate::domain::repositories::byte_source::ByteSource;
use crate::domain::services::progress_observer::ProgressObserver;

use super::cli::{Command, UploadMode};

/// `~` を展開したパス
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
}

/// アップロード方式に関係なく、上限を超えるファイルは送信前に拒否する
pub fn check_file_size(size: u64, limit: u64) -> Result<(), UploadError> {
    if size > limit {
        return Err(UploadError::FileTooLarge { size, limit });
    }
    Ok(())
}

/// `--params` のJSONを読み取る
pub fn parse_params(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("Invalid --params JSON: {}", raw))
}

/// Storage Workflow
pub struct StorageWorkflow {
    config: Config,
    storage_repository: Arc<HttpStorageRepository>,
    processing_repository: Arc<HttpProcessingRepository>,
}

impl StorageWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = Arc::new(ApiClient::new(
            &config.api_base_url,
            config.request_timeout(),
        )?);

        Ok(Self {
            storage_repository: Arc::new(HttpStorageRepository::new(client.clone())),
            processing_repository: Arc::new(HttpProcessingRepository::new(client)),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute one command
    pub async fn execute(&self, command: Command) -> Result<()> {
        info!("Using storage service at {}", self.config.api_base_url);

        match command {
            Command::Upload {
                path,
                mode,
                chunk_size,
                quiet,
            } => self.upload(&path, mode, chunk_size, quiet).await,
            Command::Download { file_id, output } => self.download(&file_id, &output).await,
            Command::Delete { file_id } => self.delete(&file_id).await,
            Command::Presign {
                file_id,
                expire_seconds,
            } => self.presign(&file_id, expire_seconds).await,
            Command::ProcessImage {
                file_id,
                operation,
                params,
            } => {
                let use_case = ProcessFileUseCase::new(self.processing_repository.clone());
                let processed = use_case
                    .process_image(&file_id, operation, parse_params(&params)?)
                    .await?;
                println!(
                    "✓ {} on {} produced file {}",
                    processed.operation, processed.source_file_id, processed.file_id
                );
                Ok(())
            }
            Command::ProcessDocument {
                file_id,
                operation,
                params,
            } => {
                let use_case = ProcessFileUseCase::new(self.processing_repository.clone());
                let processed = use_case
                    .process_document(&file_id, operation, parse_params(&params)?)
                    .await?;
                println!(
                    "✓ {} on {} produced file {}",
                    processed.operation, processed.source_file_id, processed.file_id
                );
                Ok(())
            }
        }
    }

    async fn upload(
        &self,
        path: &Path,
        mode: UploadMode,
        chunk_size: Option<u64>,
        quiet: bool,
    ) -> Result<()> {
        let source = LocalFileSource::open(path)?;
        check_file_size(source.len(), self.config.max_file_size)?;
        println!(
            "✓ Uploading {} ({} bytes, {:?} mode)",
            source.path().display(),
            source.len(),
            mode
        );

        let single_mode = match mode {
            UploadMode::Simple => SingleUploadMode::Simple,
            UploadMode::Async => SingleUploadMode::Async,
            UploadMode::Multipart => {
                return self.upload_multipart(&source, chunk_size, quiet).await
            }
        };

        let use_case =
            SimpleUploadUseCase::new(self.storage_repository.clone(), self.config.max_file_size);
        let file_id = use_case.execute(&source, single_mode).await?;

        println!("✓ Upload complete! File id: {}", file_id);
        Ok(())
    }

    async fn upload_multipart(
        &self,
        source: &LocalFileSource,
        chunk_size: Option<u64>,
        quiet: bool,
    ) -> Result<()> {
        let upload_config = self.config.to_chunk_upload_config(chunk_size);
        let cancel = CancellationToken::new();
        let use_case = ChunkedUploadUseCase::new(self.storage_repository.clone())
            .with_retry_policy(self.config.retry_policy())
            .with_cancel_token(cancel.clone());

        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling before the next part");
                cancel.cancel();
            }
        });

        let observer: Box<dyn ProgressObserver> = if quiet {
            Box::new(LogProgress::new(source.name()))
        } else {
            Box::new(ConsoleProgress::new(source.name()))
        };
        let result = use_case
            .execute(source, &upload_config, observer.as_ref())
            .await;
        ctrl_c.abort();

        let completed = result?;
        println!("✓ Upload complete! File id: {}", completed.file_id);
        Ok(())
    }

    async fn download(&self, file_id: &str, output: &Path) -> Result<()> {
        let destination = expand_path(output);
        let use_case = ManageFilesUseCase::new(self.storage_repository.clone());
        let written = use_case.download_to(file_id, &destination).await?;

        println!(
            "✓ Downloaded {} to {} ({} bytes)",
            file_id,
            destination.display(),
            written
        );
        Ok(())
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        let use_case = ManageFilesUseCase::new(self.storage_repository.clone());
        if use_case.delete(file_id).await? {
            println!("✓ Deleted {}", file_id);
        } else {
            println!("⚠ File {} not found, nothing deleted", file_id);
        }
        Ok(())
    }

    async fn presign(&self, file_id: &str, expire_seconds: u64) -> Result<()> {
        let use_case = ManageFilesUseCase::new(self.storage_repository.clone());
        let signed = use_case.presigned_url(file_id, expire_seconds).await?;

        println!("{}", signed.url);
        println!("  Expires at: {}", signed.expires_at.to_rfc3339());
        Ok(())
    }
}
