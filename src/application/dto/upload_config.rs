//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

use std::time::Duration;

use crate::domain::entities::chunk_plan::DEFAULT_CHUNK_SIZE;

/// アップロードできるファイルのデフォルト上限（500MB）
pub const DEFAULT_MAX_FILE_SIZE: u64 = 524_288_000;

/// チャンクアップロード設定
///
/// ユースケースは環境変数やファイルを直接読まず、この設定を注入される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkUploadConfig {
    /// チャンクサイズ（バイト）
    pub chunk_size: u64,
    /// 各リクエストのタイムアウト。タイムアウトは通信失敗と同じ扱い
    pub request_timeout: Option<Duration>,
}

impl ChunkUploadConfig {
    /// 新しい設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use std::time::Duration;
    /// use chunkup::application::dto::upload_config::ChunkUploadConfig;
    ///
    /// let config = ChunkUploadConfig::new(8 * 1024 * 1024, Some(Duration::from_secs(30)));
    /// assert_eq!(config.chunk_size, 8_388_608);
    ///
    /// let defaults = ChunkUploadConfig::default();
    /// assert_eq!(defaults.chunk_size, 5_242_880);
    /// assert!(defaults.request_timeout.is_none());
    /// ```
    pub fn new(chunk_size: u64, request_timeout: Option<Duration>) -> Self {
        Self {
            chunk_size,
            request_timeout,
        }
    }
}

impl Default for ChunkUploadConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, None)
    }
}

/// 単発アップロードの方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleUploadMode {
    /// 通常アップロード
    Simple,
    /// 非同期アップロード
    Async,
}
