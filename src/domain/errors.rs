//! # Upload Errors
//!
//! アップロード処理のエラー分類

use std::time::Duration;

use thiserror::Error;

/// アップロードエラー
///
/// 失敗したステップごとに分類され、呼び出し側が
/// 「再実行」「最終化のみ再試行」「諦める」を判断できるだけの情報を持つ
#[derive(Debug, Error)]
pub enum UploadError {
    /// 入力不正（空ファイル、チャンクサイズ0など）。ネットワーク呼び出し前に失敗する
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// ファイルサイズが上限を超えている
    #[error("File too large: {size} bytes exceeds limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    /// マルチパートセッションの初期化に失敗。パートは一つも送信されていない
    #[error("Failed to initialize multipart session: {0:#}")]
    SessionInit(#[source] anyhow::Error),

    /// 特定のパートのアップロードに失敗。送信済みのパートはサーバー側に残る
    #[error("Failed to upload part {part_number}: {cause:#}")]
    PartUpload {
        part_number: u32,
        #[source]
        cause: anyhow::Error,
    },

    /// 全パート送信後の最終化に失敗。最終化のみの再試行が正しい復旧手段
    #[error("Failed to complete multipart session {upload_id} (file {file_id}): {cause:#}")]
    SessionComplete {
        upload_id: String,
        file_id: String,
        #[source]
        cause: anyhow::Error,
    },

    /// 呼び出し側によるキャンセル（パート間で検出）
    #[error("Upload cancelled after {completed_parts}/{total_parts} parts")]
    Cancelled {
        completed_parts: u32,
        total_parts: u32,
    },

    /// ローカルのバイトソースを読み込めなかった
    #[error("Failed to read source: {0:#}")]
    Source(#[source] anyhow::Error),

    /// 単発リクエスト（通常/非同期アップロード）の失敗
    #[error("Upload request failed: {0:#}")]
    Request(#[source] anyhow::Error),
}

impl UploadError {
    /// キャンセルによる終了かどうか
    pub fn is_cancelled(&self) -> bool {
        matches!(self, UploadError::Cancelled { .. })
    }

    /// 失敗したパート番号（パートアップロード失敗時のみ）
    pub fn part_number(&self) -> Option<u32> {
        match self {
            UploadError::PartUpload { part_number, .. } => Some(*part_number),
            _ => None,
        }
    }
}

/// 1回の呼び出しが制限時間内に終わらなかった
///
/// 通信失敗と同じ扱いで、リトライ方針からは再試行可能と判定される
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("request timed out after {}ms", .0.as_millis())]
pub struct RequestTimeout(pub Duration);
