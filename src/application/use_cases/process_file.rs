//! # Process File Use Case
//!
//! 保存済みファイルに対する画像・文書処理

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use serde_json::Value;

use crate::domain::entities::stored_file::{
    DocumentOperation, ImageOperation, ProcessError, ProcessedFile,
};
use crate::domain::repositories::processing_repository::ProcessingRepository;

/// ファイル処理ユースケース
pub struct ProcessFileUseCase<R: ProcessingRepository> {
    repository: Arc<R>,
}

impl<R: ProcessingRepository> ProcessFileUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// 画像を処理
    pub async fn process_image(
        &self,
        file_id: &str,
        operation: ImageOperation,
        params: Value,
    ) -> Result<ProcessedFile> {
        validate_request(file_id, &params)?;

        let processed_id = self
            .repository
            .process_image(file_id, operation.as_str(), &params)
            .await
            .with_context(|| format!("Image operation {} failed for {}", operation, file_id))?;

        info!(
            "Image operation {} on {} produced {}",
            operation, file_id, processed_id
        );

        Ok(ProcessedFile {
            source_file_id: file_id.to_string(),
            operation: operation.to_string(),
            file_id: processed_id,
        })
    }

    /// 文書を処理
    pub async fn process_document(
        &self,
        file_id: &str,
        operation: DocumentOperation,
        params: Value,
    ) -> Result<ProcessedFile> {
        validate_request(file_id, &params)?;

        let processed_id = self
            .repository
            .process_document(file_id, operation.as_str(), &params)
            .await
            .with_context(|| {
                format!("Document operation {} failed for {}", operation, file_id)
            })?;

        info!(
            "Document operation {} on {} produced {}",
            operation, file_id, processed_id
        );

        Ok(ProcessedFile {
            source_file_id: file_id.to_string(),
            operation: operation.to_string(),
            file_id: processed_id,
        })
    }
}

fn validate_request(file_id: &str, params: &Value) -> Result<(), ProcessError> {
    if file_id.trim().is_empty() {
        return Err(ProcessError::EmptyFileId);
    }
    if !params.is_object() {
        return Err(ProcessError::InvalidParams);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::processing_repository::MockProcessingRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_process_image_passes_operation_name() {
        let mut mock = MockProcessingRepository::new();
        mock.expect_process_image()
            .withf(|file_id, operation, params| {
                file_id == "img-1" && operation == "watermark" && params["text"] == "draft"
            })
            .times(1)
            .returning(|_, _, _| Ok("img-2".to_string()));

        let use_case = ProcessFileUseCase::new(Arc::new(mock));
        let result = use_case
            .process_image("img-1", ImageOperation::Watermark, json!({"text": "draft"}))
            .await
            .unwrap();

        assert_eq!(result.file_id, "img-2");
        assert_eq!(result.source_file_id, "img-1");
        assert_eq!(result.operation, "watermark");
    }

    #[tokio::test]
    async fn test_process_document() {
        let mut mock = MockProcessingRepository::new();
        mock.expect_process_document()
            .withf(|_, operation, _| operation == "generatePdf")
            .returning(|_, _, _| Ok("doc-2".to_string()));

        let use_case = ProcessFileUseCase::new(Arc::new(mock));
        let result = use_case
            .process_document("doc-1", DocumentOperation::GeneratePdf, json!({}))
            .await
            .unwrap();

        assert_eq!(result.file_id, "doc-2");
    }

    #[tokio::test]
    async fn test_rejects_non_object_params() {
        let mut mock = MockProcessingRepository::new();
        mock.expect_process_image().never();

        let use_case = ProcessFileUseCase::new(Arc::new(mock));
        let err = use_case
            .process_image("img-1", ImageOperation::Crop, json!([1, 2]))
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ProcessError>(),
            Some(&ProcessError::InvalidParams)
        );
    }

    #[tokio::test]
    async fn test_rejects_empty_file_id() {
        let mock = MockProcessingRepository::new();
        let use_case = ProcessFileUseCase::new(Arc::new(mock));

        let err = use_case
            .process_document(" ", DocumentOperation::ExportExcel, json!({}))
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ProcessError>(),
            Some(&ProcessError::EmptyFileId)
        );
    }
}
