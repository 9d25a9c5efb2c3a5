//! # File Repository Trait
//!
//! 単発アップロードと保存済みファイルの管理を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// ファイルリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// 1リクエストでアップロードし、ファイルIDを返す
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<String>;

    /// サーバー側で非同期に保存されるアップロード。ファイルIDを返す
    async fn upload_async(&self, file_name: &str, content: Vec<u8>) -> Result<String>;

    /// ファイルをダウンロード
    async fn download(&self, file_id: &str) -> Result<Vec<u8>>;

    /// ファイルを削除
    ///
    /// # Returns
    ///
    /// 削除できた場合 `true`、存在しなかった場合 `false`
    async fn delete(&self, file_id: &str) -> Result<bool>;

    /// 有効期限付きの署名URLを発行
    async fn presigned_url(&self, file_id: &str, expire_seconds: u64) -> Result<String>;
}
