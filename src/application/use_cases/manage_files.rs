//! # Manage Files Use Case
//!
//! 保存済みファイルのダウンロード・削除・署名URL発行

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};

use crate::domain::entities::stored_file::PresignedUrl;
use crate::domain::repositories::file_repository::FileRepository;

/// ファイル管理ユースケース
pub struct ManageFilesUseCase<R: FileRepository> {
    repository: Arc<R>,
}

impl<R: FileRepository> ManageFilesUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// ファイルをダウンロードしてローカルに保存
    ///
    /// # Returns
    ///
    /// 書き込んだバイト数
    pub async fn download_to(&self, file_id: &str, destination: &Path) -> Result<u64> {
        let content = self
            .repository
            .download(file_id)
            .await
            .with_context(|| format!("Failed to download file {}", file_id))?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .context("Failed to create download directory")?;
            }
        }

        tokio::fs::write(destination, &content)
            .await
            .with_context(|| format!("Failed to write {}", destination.display()))?;

        info!(
            "Downloaded file {} to {} ({} bytes)",
            file_id,
            destination.display(),
            content.len()
        );

        Ok(content.len() as u64)
    }

    /// ファイルを削除
    ///
    /// # Returns
    ///
    /// 削除できた場合 `true`、存在しなかった場合 `false`
    pub async fn delete(&self, file_id: &str) -> Result<bool> {
        let deleted = self
            .repository
            .delete(file_id)
            .await
            .with_context(|| format!("Failed to delete file {}", file_id))?;

        if deleted {
            info!("Deleted file {}", file_id);
        } else {
            warn!("File {} was not found, nothing deleted", file_id);
        }

        Ok(deleted)
    }

    /// 有効期限付きの署名URLを発行
    pub async fn presigned_url(&self, file_id: &str, expire_seconds: u64) -> Result<PresignedUrl> {
        if expire_seconds == 0 {
            anyhow::bail!("expire seconds must be positive");
        }

        let issued_at = Utc::now();
        let url = self
            .repository
            .presigned_url(file_id, expire_seconds)
            .await
            .with_context(|| format!("Failed to generate signed URL for {}", file_id))?;

        Ok(PresignedUrl::new(url, issued_at, expire_seconds))
    }
}
