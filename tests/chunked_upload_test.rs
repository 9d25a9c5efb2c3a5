//! Chunked Upload Integration Tests
//!
//! ChunkedUploadUseCase を記録用リポジトリとローカルファイルで検証

use std::fs;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use chunkup::adapter::source::local_file::LocalFileSource;
use chunkup::adapter::source::memory::MemorySource;
use chunkup::application::dto::upload_config::ChunkUploadConfig;
use chunkup::domain::entities::chunk_plan::DEFAULT_CHUNK_SIZE;
use chunkup::domain::entities::progress::{ProgressUpdate, UploadPhase};
use chunkup::domain::entities::upload_session::{CompletedPart, CompletedUpload, MultipartInit};
use chunkup::domain::errors::UploadError;
use chunkup::domain::repositories::multipart_repository::MultipartRepository;
use chunkup::application::use_cases::chunked_upload::ChunkedUploadUseCase;

/// リポジトリへの呼び出し記録
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Init(String),
    Part { part_number: u32, len: usize },
    Complete(Vec<CompletedPart>),
}

/// 呼び出しを記録するフェイクのストレージ
#[derive(Default)]
struct RecordingRepository {
    calls: Mutex<Vec<Call>>,
    fail_on_part: Option<u32>,
    cancel_after_part: Option<(u32, CancellationToken)>,
}

impl RecordingRepository {
    fn failing_on(part_number: u32) -> Self {
        Self {
            fail_on_part: Some(part_number),
            ..Self::default()
        }
    }

    fn cancelling_after(part_number: u32, token: CancellationToken) -> Self {
        Self {
            cancel_after_part: Some((part_number, token)),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn part_numbers(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Part { part_number, .. } => Some(part_number),
                _ => None,
            })
            .collect()
    }

    fn completed(&self) -> bool {
        self.calls()
            .iter()
            .any(|call| matches!(call, Call::Complete(_)))
    }
}

#[async_trait]
impl MultipartRepository for RecordingRepository {
    async fn init_multipart_upload(&self, file_name: &str) -> Result<MultipartInit> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Init(file_name.to_string()));
        Ok(MultipartInit {
            upload_id: "upload-1".to_string(),
            file_id: "file-1".to_string(),
        })
    }

    async fn upload_part(
        &self,
        upload_id: &str,
        part_number: u32,
        file_id: &str,
        chunk: Vec<u8>,
    ) -> Result<String> {
        assert_eq!(upload_id, "upload-1");
        assert_eq!(file_id, "file-1");

        self.calls.lock().unwrap().push(Call::Part {
            part_number,
            len: chunk.len(),
        });

        if self.fail_on_part == Some(part_number) {
            anyhow::bail!("500 Internal Server Error");
        }
        if let Some((after, token)) = &self.cancel_after_part {
            if *after == part_number {
                token.cancel();
            }
        }

        Ok(format!("etag-{}", part_number))
    }

    async fn complete_multipart_upload(
        &self,
        upload_id: &str,
        file_id: &str,
        parts: &[CompletedPart],
    ) -> Result<CompletedUpload> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Complete(parts.to_vec()));
        Ok(CompletedUpload::new(
            file_id,
            json!({"fileId": file_id, "uploadId": upload_id, "parts": parts.len()}),
        ))
    }
}

fn recorder() -> (Arc<Mutex<Vec<ProgressUpdate>>>, impl Fn(ProgressUpdate) + Send + Sync) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |update: ProgressUpdate| {
        sink.lock().unwrap().push(update)
    })
}

fn write_file(dir: &TempDir, name: &str, size: usize) -> LocalFileSource {
    let path = dir.path().join(name);
    let content: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    fs::write(&path, content).unwrap();
    LocalFileSource::open(&path).unwrap()
}

#[tokio::test]
async fn test_twelve_megabyte_file_uploads_three_parts_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_file(&temp_dir, "video.mp4", 12_000_000);
    let repository = Arc::new(RecordingRepository::default());
    let (seen, observer) = recorder();

    let use_case = ChunkedUploadUseCase::new(repository.clone());
    let completed = use_case
        .execute(
            &source,
            &ChunkUploadConfig::new(DEFAULT_CHUNK_SIZE, None),
            &observer,
        )
        .await
        .unwrap();

    assert_eq!(completed.file_id, "file-1");
    assert_eq!(completed.details["parts"], 3);

    assert_eq!(
        repository.calls(),
        vec![
            Call::Init("video.mp4".to_string()),
            Call::Part {
                part_number: 1,
                len: 5_242_880
            },
            Call::Part {
                part_number: 2,
                len: 5_242_880
            },
            Call::Part {
                part_number: 3,
                len: 1_514_240
            },
            Call::Complete(vec![
                CompletedPart {
                    part_number: 1,
                    etag: "etag-1".to_string()
                },
                CompletedPart {
                    part_number: 2,
                    etag: "etag-2".to_string()
                },
                CompletedPart {
                    part_number: 3,
                    etag: "etag-3".to_string()
                },
            ]),
        ]
    );

    let percents: Vec<u8> = seen.lock().unwrap().iter().map(|u| u.percent).collect();
    assert_eq!(percents, vec![33, 67, 99, 100]);
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_exact_chunk_size_still_runs_full_session() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_file(&temp_dir, "exact.bin", 5_242_880);
    let repository = Arc::new(RecordingRepository::default());
    let (seen, observer) = recorder();

    let use_case = ChunkedUploadUseCase::new(repository.clone());
    use_case
        .execute(&source, &ChunkUploadConfig::default(), &observer)
        .await
        .unwrap();

    let calls = repository.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], Call::Init("exact.bin".to_string()));
    assert_eq!(
        calls[1],
        Call::Part {
            part_number: 1,
            len: 5_242_880
        }
    );
    assert!(matches!(&calls[2], Call::Complete(parts) if parts.len() == 1));

    let seen = seen.lock().unwrap();
    let last = seen.last().unwrap();
    assert_eq!(last.percent, 100);
    assert_eq!(last.phase, UploadPhase::Completed);
}

#[tokio::test]
async fn test_failure_on_middle_part_stops_the_upload() {
    let source = MemorySource::new("data.bin", vec![7u8; 50]);
    let repository = Arc::new(RecordingRepository::failing_on(3));
    let (seen, observer) = recorder();

    let use_case = ChunkedUploadUseCase::new(repository.clone());
    let err = use_case
        .execute(&source, &ChunkUploadConfig::new(10, None), &observer)
        .await
        .unwrap_err();

    assert_eq!(err.part_number(), Some(3));
    assert!(err.to_string().contains("500 Internal Server Error"));
    assert_eq!(repository.part_numbers(), vec![1, 2, 3]);
    assert!(!repository.completed());

    let percents: Vec<u8> = seen.lock().unwrap().iter().map(|u| u.percent).collect();
    assert_eq!(percents, vec![20, 40]);
}

#[tokio::test]
async fn test_cancel_after_second_of_five_parts() {
    let source = MemorySource::new("data.bin", vec![1u8; 50]);
    let cancel = CancellationToken::new();
    let repository = Arc::new(RecordingRepository::cancelling_after(2, cancel.clone()));
    let (seen, observer) = recorder();

    let use_case = ChunkedUploadUseCase::new(repository.clone()).with_cancel_token(cancel);
    let err = use_case
        .execute(&source, &ChunkUploadConfig::new(10, None), &observer)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(matches!(
        err,
        UploadError::Cancelled {
            completed_parts: 2,
            total_parts: 5
        }
    ));
    assert_eq!(repository.part_numbers(), vec![1, 2]);
    assert!(!repository.completed());
    assert_eq!(seen.lock().unwrap().last().unwrap().percent, 40);
}

#[tokio::test]
async fn test_zero_byte_file_is_rejected_before_init() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_file(&temp_dir, "empty.txt", 0);
    let repository = Arc::new(RecordingRepository::default());
    let (seen, observer) = recorder();

    let use_case = ChunkedUploadUseCase::new(repository.clone());
    let err = use_case
        .execute(&source, &ChunkUploadConfig::default(), &observer)
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::InvalidInput(_)));
    assert!(repository.calls().is_empty());
    assert!(seen.lock().unwrap().is_empty());
}
