//! Storage API HTTP Client
//!
//! reqwestクライアントの薄いラッパー（ベースURL、タイムアウト、ステータス検査）

use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

/// 2xx以外の応答。ステータスはリトライ判定に使う
#[derive(Debug, Error)]
#[error("{what} failed: {status}: {body}")]
pub struct HttpStatusError {
    pub what: String,
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client bound to one storage service base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and turn non-2xx statuses into errors carrying the body
    pub async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("{} request failed", what))?;

        check_status(response, what).await
    }

    /// Multipart form with the payload under the `file` field
    pub fn file_form(file_name: &str, content: Vec<u8>) -> Form {
        let part = Part::bytes(content).file_name(file_name.to_string());
        Form::new().part("file", part)
    }
}

/// Fail with `HttpStatusError` when the response is not a success
pub async fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        debug!("{} -> {}", what, status);
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("{} failed with {}: {}", what, status, body.trim());
    Err(HttpStatusError {
        what: what.to_string(),
        status,
        body: body.trim().to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:8080/", Duration::from_secs(30)).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.url("/api/storage/upload"),
            "http://localhost:8080/api/storage/upload"
        );
        assert_eq!(
            client.url("api/storage/upload"),
            "http://localhost:8080/api/storage/upload"
        );
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = ApiClient::with_client(Client::new(), "https://files.example.com/gateway");
        assert_eq!(
            client.url("/api/storage/multipart/init"),
            "https://files.example.com/gateway/api/storage/multipart/init"
        );
    }

    #[test]
    fn test_status_error_keeps_status_and_message() {
        let err = anyhow::Error::new(HttpStatusError {
            what: "Part 429 upload".to_string(),
            status: StatusCode::BAD_REQUEST,
            body: "bad etag".to_string(),
        });

        assert_eq!(
            err.to_string(),
            "Part 429 upload failed: 400 Bad Request: bad etag"
        );
        assert_eq!(
            err.downcast_ref::<HttpStatusError>().map(|e| e.status),
            Some(StatusCode::BAD_REQUEST)
        );
    }
}
