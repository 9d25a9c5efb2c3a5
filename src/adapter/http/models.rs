//! Storage API Wire Models
//!
//! ストレージAPIのリクエスト/レスポンス表現

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::upload_session::CompletedPart;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitMultipartRequest<'a> {
    pub file_name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitMultipartResponse {
    pub upload_id: String,
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadPartResponse {
    #[serde(alias = "eTag", alias = "ETag")]
    pub etag: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteMultipartRequest<'a> {
    pub upload_id: &'a str,
    pub file_id: &'a str,
    pub parts: &'a [CompletedPart],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest<'a> {
    pub file_id: &'a str,
    pub operation: &'a str,
    pub params: &'a Value,
}

/// Extract a file id from a response body
///
/// The service answers either with a bare id, a JSON string, or an object
/// carrying `fileId`.
pub fn parse_file_id(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(id)) => Some(id).filter(|id| !id.is_empty()),
        Ok(Value::Object(map)) => map
            .get("fileId")
            .and_then(Value::as_str)
            .map(str::to_string),
        Ok(Value::Number(n)) => Some(n.to_string()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}

/// Extract the final file id from a complete-multipart response
pub fn completed_file_id(body: &Value) -> Option<String> {
    match body {
        Value::String(id) => Some(id.clone()),
        Value::Object(map) => map
            .get("fileId")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Extract a part ETag from `{"etag": ...}`, a JSON string, or bare text
pub fn parse_etag(body: &str) -> Option<String> {
    if let Ok(resp) = serde_json::from_str::<UploadPartResponse>(body) {
        return Some(resp.etag);
    }
    parse_plain_text(body)
}

/// Unquote a JSON string body, or return the trimmed text as is
pub fn parse_plain_text(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let text = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(s)) => s,
        _ => trimmed.to_string(),
    };
    Some(text).filter(|t| !t.is_empty())
}

/// Parse a boolean delete response (`true` / `false`)
pub fn parse_bool(body: &str) -> Option<bool> {
    match body.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
