//! HTTP Processing Repository Implementation
//!
//! ProcessingRepositoryのHTTP実装

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::adapter::http::client::ApiClient;
use crate::adapter::http::models::{parse_file_id, ProcessRequest};
use crate::domain::repositories::processing_repository::ProcessingRepository;

const PROCESS_IMAGE_PATH: &str = "api/file/process/image";
const PROCESS_DOCUMENT_PATH: &str = "api/file/process/document";

/// HTTPファイル処理リポジトリ
pub struct HttpProcessingRepository {
    client: Arc<ApiClient>,
}

impl HttpProcessingRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn process(
        &self,
        path: &str,
        file_id: &str,
        operation: &str,
        params: &Value,
    ) -> Result<String> {
        let what = format!("Processing {} of {}", operation, file_id);
        let request = self
            .client
            .http()
            .post(self.client.url(path))
            .json(&ProcessRequest {
                file_id,
                operation,
                params,
            });

        let body = self
            .client
            .send(request, &what)
            .await?
            .text()
            .await
            .with_context(|| format!("Failed to read {} response", what))?;

        parse_file_id(&body)
            .with_context(|| format!("{} response carried no file id: {}", what, body.trim()))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl ProcessingRepository for HttpProcessingRepository {
    async fn process_image(&self, file_id: &str, operation: &str, params: &Value) -> Result<String> {
        self.process(PROCESS_IMAGE_PATH, file_id, operation, params)
            .await
    }

    async fn process_document(
        &self,
        file_id: &str,
        operation: &str,
        params: &Value,
    ) -> Result<String> {
        self.process(PROCESS_DOCUMENT_PATH, file_id, operation, params)
            .await
    }
}
