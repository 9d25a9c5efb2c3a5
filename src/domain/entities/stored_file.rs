//! # Stored File Value Objects
//!
//! 保存済みファイルに対する操作の値オブジェクト

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 署名URLのデフォルト有効期間（秒）
pub const DEFAULT_PRESIGNED_EXPIRE_SECONDS: u64 = 3600;

/// 有効期限付きの署名URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

impl PresignedUrl {
    /// 発行時刻と有効期間から作成
    pub fn new(url: String, issued_at: DateTime<Utc>, expire_seconds: u64) -> Self {
        let secs = i64::try_from(expire_seconds).unwrap_or(i64::MAX);
        let expires_at = Duration::try_seconds(secs)
            .and_then(|d| issued_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { url, expires_at }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// ファイル処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Unknown image operation: {0}")]
    UnknownImageOperation(String),

    #[error("Unknown document operation: {0}")]
    UnknownDocumentOperation(String),

    #[error("File id must not be empty")]
    EmptyFileId,

    #[error("Processing params must be a JSON object")]
    InvalidParams,
}

/// 画像処理の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOperation {
    Compress,
    Convert,
    Watermark,
    Crop,
}

impl ImageOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageOperation::Compress => "compress",
            ImageOperation::Convert => "convert",
            ImageOperation::Watermark => "watermark",
            ImageOperation::Crop => "crop",
        }
    }
}

impl FromStr for ImageOperation {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compress" => Ok(ImageOperation::Compress),
            "convert" => Ok(ImageOperation::Convert),
            "watermark" => Ok(ImageOperation::Watermark),
            "crop" => Ok(ImageOperation::Crop),
            other => Err(ProcessError::UnknownImageOperation(other.to_string())),
        }
    }
}

impl fmt::Display for ImageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 文書処理の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOperation {
    GeneratePdf,
    ImportExcel,
    ExportExcel,
}

impl DocumentOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentOperation::GeneratePdf => "generatePdf",
            DocumentOperation::ImportExcel => "importExcel",
            DocumentOperation::ExportExcel => "exportExcel",
        }
    }
}

impl FromStr for DocumentOperation {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generatePdf" => Ok(DocumentOperation::GeneratePdf),
            "importExcel" => Ok(DocumentOperation::ImportExcel),
            "exportExcel" => Ok(DocumentOperation::ExportExcel),
            other => Err(ProcessError::UnknownDocumentOperation(other.to_string())),
        }
    }
}

impl fmt::Display for DocumentOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub source_file_id: String,
    pub operation: String,
    /// 処理後に生成されたファイルID
    pub file_id: String,
}
