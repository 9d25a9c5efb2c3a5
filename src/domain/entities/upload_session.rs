//! # UploadSession Entity
//!
//! マルチパートアップロードのセッションとパート

use serde::{Deserialize, Serialize};

/// マルチパート初期化の結果（サーバー発行のID）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartInit {
    pub upload_id: String,
    pub file_id: String,
}

/// アップロードセッション
///
/// 初期化で作成され、以後は不変。完了または中断で破棄される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    upload_id: String,
    file_id: String,
    total_parts: u32,
}

impl UploadSession {
    /// 初期化結果とパート数からセッションを作成
    pub fn new(init: MultipartInit, total_parts: u32) -> Self {
        Self {
            upload_id: init.upload_id,
            file_id: init.file_id,
            total_parts,
        }
    }

    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn total_parts(&self) -> u32 {
        self.total_parts
    }
}

/// アップロード済みパート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPart {
    pub part_number: u32,
    pub etag: String,
}

/// マルチパートアップロードの完了結果
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedUpload {
    /// 最終的なファイルID
    pub file_id: String,
    /// サーバーが返したレスポンス全体
    pub details: serde_json::Value,
}

impl CompletedUpload {
    pub fn new(file_id: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            file_id: file_id.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_from_init() {
        let session = UploadSession::new(
            MultipartInit {
                upload_id: "upload-1".to_string(),
                file_id: "file-1".to_string(),
            },
            3,
        );

        assert_eq!(session.upload_id(), "upload-1");
        assert_eq!(session.file_id(), "file-1");
        assert_eq!(session.total_parts(), 3);
    }

    #[test]
    fn test_completed_part_wire_names() {
        let part = CompletedPart {
            part_number: 2,
            etag: "\"abc\"".to_string(),
        };
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value, json!({"partNumber": 2, "etag": "\"abc\""}));
    }
}
