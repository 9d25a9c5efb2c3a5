//! # Multipart Repository Trait
//!
//! ストレージサービスのマルチパートアップロードを抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::upload_session::{CompletedPart, CompletedUpload, MultipartInit};

/// マルチパートリポジトリ
///
/// 初期化・パート送信・完了の3操作。ワイヤーフォーマットは実装側が持つ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MultipartRepository: Send + Sync {
    /// セッションを初期化
    ///
    /// # Arguments
    ///
    /// * `file_name` - 申告するファイル名
    ///
    /// # Returns
    ///
    /// サーバーが発行した `upload_id` と `file_id`
    async fn init_multipart_upload(&self, file_name: &str) -> Result<MultipartInit>;

    /// 1パートを送信
    ///
    /// # Returns
    ///
    /// パートのETag
    async fn upload_part(
        &self,
        upload_id: &str,
        part_number: u32,
        file_id: &str,
        chunk: Vec<u8>,
    ) -> Result<String>;

    /// セッションを完了
    ///
    /// # Arguments
    ///
    /// * `parts` - パート番号昇順のパート一覧
    async fn complete_multipart_upload(
        &self,
        upload_id: &str,
        file_id: &str,
        parts: &[CompletedPart],
    ) -> Result<CompletedUpload>;
}
