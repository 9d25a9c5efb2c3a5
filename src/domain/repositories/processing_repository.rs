//! # Processing Repository Trait
//!
//! 画像・文書処理サービスを抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// 処理リポジトリ
///
/// どちらの操作も処理後のファイルIDを返す
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProcessingRepository: Send + Sync {
    async fn process_image(
        &self,
        file_id: &str,
        operation: &str,
        params: &serde_json::Value,
    ) -> Result<String>;

    async fn process_document(
        &self,
        file_id: &str,
        operation: &str,
        params: &serde_json::Value,
    ) -> Result<String>;
}
