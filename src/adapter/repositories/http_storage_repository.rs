//! HTTP Storage Repository Implementation
//!
//! MultipartRepository / FileRepository のHTTP実装

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde_json::Value;

use crate::adapter::http::client::{check_status, ApiClient};
use crate::adapter::http::models::{
    completed_file_id, parse_bool, parse_etag, parse_file_id, parse_plain_text,
    CompleteMultipartRequest, InitMultipartRequest, InitMultipartResponse,
};
use crate::domain::entities::upload_session::{CompletedPart, CompletedUpload, MultipartInit};
use crate::domain::repositories::file_repository::FileRepository;
use crate::domain::repositories::multipart_repository::MultipartRepository;

const MULTIPART_INIT_PATH: &str = "api/storage/multipart/init";
const MULTIPART_PART_PATH: &str = "api/storage/multipart/part";
const MULTIPART_COMPLETE_PATH: &str = "api/storage/multipart/complete";
const UPLOAD_PATH: &str = "api/storage/upload";
const UPLOAD_ASYNC_PATH: &str = "api/storage/upload-async";

/// HTTPストレージリポジトリ
pub struct HttpStorageRepository {
    client: Arc<ApiClient>,
}

impl HttpStorageRepository {
    /// 新しいリポジトリを作成
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn upload_form(&self, path: &str, file_name: &str, content: Vec<u8>) -> Result<String> {
        let what = format!("Upload of {}", file_name);
        let request = self
            .client
            .http()
            .post(self.client.url(path))
            .multipart(ApiClient::file_form(file_name, content));

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
impl MultipartRepository for HttpStorageRepository {
    async fn init_multipart_upload(&self, file_name: &str) -> Result<MultipartInit> {
        let request = self
            .client
            .http()
            .post(self.client.url(MULTIPART_INIT_PATH))
            .json(&InitMultipartRequest { file_name });

        let response: InitMultipartResponse = self
            .client
            .send(request, "Multipart init")
            .await?
            .json()
            .await
            .context("Failed to parse multipart init response")?;

        debug!(
            "Multipart session {} opened for {} (file {})",
            response.upload_id, file_name, response.file_id
        );

        Ok(MultipartInit {
            upload_id: response.upload_id,
            file_id: response.file_id,
        })
    }

    async fn upload_part(
        &self,
        upload_id: &str,
        part_number: u32,
        file_id: &str,
        chunk: Vec<u8>,
    ) -> Result<String> {
        let what = format!("Part {} upload", part_number);
        let part_number_param = part_number.to_string();
        let file_name = format!("part-{}", part_number);
        let request = self
            .client
            .http()
            .post(self.client.url(MULTIPART_PART_PATH))
            .query(&[
                ("uploadId", upload_id),
                ("partNumber", part_number_param.as_str()),
                ("fileId", file_id),
            ])
            .multipart(ApiClient::file_form(&file_name, chunk));

        let body = self
            .client
            .send(request, &what)
            .await?
            .text()
            .await
            .with_context(|| format!("Failed to read {} response", what))?;

        parse_etag(&body).with_context(|| format!("{} response carried no etag", what))
    }

    async fn complete_multipart_upload(
        &self,
        upload_id: &str,
        file_id: &str,
        parts: &[CompletedPart],
    ) -> Result<CompletedUpload> {
        let request = self
            .client
            .http()
            .post(self.client.url(MULTIPART_COMPLETE_PATH))
            .json(&CompleteMultipartRequest {
                upload_id,
                file_id,
                parts,
            });

        let body = self
            .client
            .send(request, "Multipart complete")
            .await?
            .text()
            .await
            .context("Failed to read multipart complete response")?;

        let details = serde_json::from_str::<Value>(&body)
            .unwrap_or_else(|_| Value::String(body.trim().to_string()));
        let final_id = completed_file_id(&details).unwrap_or_else(|| {
            debug!(
                "Complete response for {} has no fileId, keeping session file id",
                upload_id
            );
            file_id.to_string()
        });

        Ok(CompletedUpload::new(final_id, details))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl FileRepository for HttpStorageRepository {
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<String> {
        self.upload_form(UPLOAD_PATH, file_name, content).await
    }

    async fn upload_async(&self, file_name: &str, content: Vec<u8>) -> Result<String> {
        self.upload_form(UPLOAD_ASYNC_PATH, file_name, content).await
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        let what = format!("Download of {}", file_id);
        let request = self
            .client
            .http()
            .get(self.client.url(&format!("api/storage/download/{}", file_id)));

        let bytes = self
            .client
            .send(request, &what)
            .await?
            .bytes()
            .await
            .with_context(|| format!("Failed to read {} body", what))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, file_id: &str) -> Result<bool> {
        let what = format!("Delete of {}", file_id);
        let response = self
            .client
            .http()
            .delete(self.client.url(&format!("api/storage/delete/{}", file_id)))
            .send()
            .await
            .with_context(|| format!("{} request failed", what))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        let body = check_status(response, &what)
            .await?
            .text()
            .await
            .unwrap_or_default();

        Ok(parse_bool(&body).unwrap_or(true))
    }

    async fn presigned_url(&self, file_id: &str, expire_seconds: u64) -> Result<String> {
        let what = format!("Signed URL for {}", file_id);
        let request = self
            .client
            .http()
            .get(self.client.url(&format!("api/storage/presigned-url/{}", file_id)))
            .query(&[("expireSeconds", expire_seconds)]);

        let body = self
            .client
            .send(request, &what)
            .await?
            .text()
            .await
            .with_context(|| format!("Failed to read {} response", what))?;

        parse_plain_text(&body).with_context(|| format!("{} response was empty", what))
    }
}
