//! # Simple Upload Use Case
//!
//! 1リクエストで完結する通常/非同期アップロード

use std::sync::Arc;

use log::info;

use crate::application::dto::upload_config::SingleUploadMode;
use crate::domain::errors::UploadError;
use crate::domain::repositories::byte_source::ByteSource;
use crate::domain::repositories::file_repository::FileRepository;

/// 単発アップロードユースケース
pub struct SimpleUploadUseCase<R: FileRepository> {
    repository: Arc<R>,
    max_file_size: u64,
}

impl<R: FileRepository> SimpleUploadUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `repository` - ファイルリポジトリ
    /// * `max_file_size` - 受け付ける最大バイト数
    pub fn new(repository: Arc<R>, max_file_size: u64) -> Self {
        Self {
            repository,
            max_file_size,
        }
    }

    /// ファイル全体を読み込んで送信し、ファイルIDを返す
    ///
    /// # Errors
    ///
    /// 空ファイルまたは上限超過の場合は送信前に失敗する
    pub async fn execute<S>(&self, source: &S, mode: SingleUploadMode) -> Result<String, UploadError>
    where
        S: ByteSource + ?Sized,
    {
        let size = source.len();
        if size == 0 {
            return Err(UploadError::InvalidInput(
                "file is empty (0 bytes)".to_string(),
            ));
        }
        if size > self.max_file_size {
            return Err(UploadError::FileTooLarge {
                size,
                limit: self.max_file_size,
            });
        }

        let content = source.read_all().await.map_err(UploadError::Source)?;

        info!(
            "Uploading {} ({} bytes, {:?} mode)",
            source.name(),
            size,
            mode
        );

        let file_id = match mode {
            SingleUploadMode::Simple => self.repository.upload(source.name(), content).await,
            SingleUploadMode::Async => self.repository.upload_async(source.name(), content).await,
        }
        .map_err(UploadError::Request)?;

        info!("Uploaded {} as file {}", source.name(), file_id);

        Ok(file_id)
    }
}
