//! # Chunked Upload Use Case
//!
//! 大きなファイルをパートに分割して順番にアップロードするユースケース

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::application::dto::upload_config::ChunkUploadConfig;
use crate::domain::entities::chunk_plan::ChunkPlan;
use crate::domain::entities::progress::{ProgressState, ProgressUpdate, UploadPhase};
use crate::domain::entities::upload_session::{CompletedPart, CompletedUpload, UploadSession};
use crate::domain::errors::{RequestTimeout, UploadError};
use crate::domain::repositories::byte_source::ByteSource;
use crate::domain::repositories::multipart_repository::MultipartRepository;
use crate::domain::services::progress_observer::ProgressObserver;
use crate::domain::services::retry_policy::{NoRetry, RetryPolicy, RetryStep};

/// チャンクアップロードユースケース
///
/// 初期化 → パートを1つずつ昇順に送信 → 完了 の順に進める。
/// 同時に送信中のパートは常に1つだけ
pub struct ChunkedUploadUseCase<R: MultipartRepository> {
    repository: Arc<R>,
    retry_policy: Arc<dyn RetryPolicy>,
    cancel: CancellationToken,
}

impl<R: MultipartRepository> ChunkedUploadUseCase<R> {
    /// 新しいユースケースを作成（リトライなし）
    ///
    /// # Arguments
    ///
    /// * `repository` - マルチパートリポジトリ
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            retry_policy: Arc::new(NoRetry),
            cancel: CancellationToken::new(),
        }
    }

    /// リトライ方針を差し替える
    pub fn with_retry_policy(mut self, retry_policy: Arc<dyn RetryPolicy>) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// 外部のキャンセルトークンを使う
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// キャンセル用トークンを返す
    ///
    /// キャンセルは次のパート送信前に検出される
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// ファイルをチャンク単位でアップロード
    ///
    /// # Arguments
    ///
    /// * `source` - アップロード元
    /// * `config` - チャンクサイズとタイムアウト
    /// * `observer` - 進捗の通知先
    ///
    /// # Returns
    ///
    /// ストレージサービスが返した完了結果
    ///
    /// # Errors
    ///
    /// 最初に起きた失敗を `UploadError` として返す。内部でのリトライは
    /// リトライ方針が許す場合のみ
    pub async fn execute<S>(
        &self,
        source: &S,
        config: &ChunkUploadConfig,
        observer: &dyn ProgressObserver,
    ) -> Result<CompletedUpload, UploadError>
    where
        S: ByteSource + ?Sized,
    {
        let plan = ChunkPlan::new(source.len(), config.chunk_size)?;
        let total_parts = plan.total_parts();
        let mut progress = ProgressState::new(total_parts);

        info!(
            "Starting chunked upload of {} ({} bytes, {} parts of {} bytes)",
            source.name(),
            plan.file_size(),
            total_parts,
            plan.chunk_size()
        );

        self.check_cancelled(&progress)?;

        let init = self
            .call_with_retry(RetryStep::Init, config.request_timeout, || {
                self.repository.init_multipart_upload(source.name())
            })
            .await
            .map_err(UploadError::SessionInit)?;
        let session = UploadSession::new(init, total_parts);

        info!(
            "Initialized multipart session {} (file {})",
            session.upload_id(),
            session.file_id()
        );

        let mut parts: Vec<CompletedPart> =
            Vec::with_capacity(initial_parts_capacity(total_parts));

        for range in plan.ranges() {
            self.check_cancelled(&progress)?;

            let part_number = range.part_number;
            let chunk = source
                .read_range(&range)
                .await
                .map_err(UploadError::Source)?;

            debug!(
                "Uploading part {}/{} (bytes {}..{})",
                part_number, total_parts, range.start, range.end
            );

            let etag = self
                .call_with_retry(RetryStep::Part(part_number), config.request_timeout, || {
                    self.repository.upload_part(
                        session.upload_id(),
                        part_number,
                        session.file_id(),
                        chunk.clone(),
                    )
                })
                .await
                .map_err(|cause| {
                    warn!("Part {} failed, aborting upload: {:#}", part_number, cause);
                    UploadError::PartUpload { part_number, cause }
                })?;

            parts.push(CompletedPart { part_number, etag });
            progress.advance();

            let phase = if progress.all_parts_done() {
                UploadPhase::PartsUploaded
            } else {
                UploadPhase::Uploading
            };
            observer.on_progress(ProgressUpdate {
                percent: progress.pending_percent(),
                phase,
                state: progress,
            });
        }

        let completed = self
            .call_with_retry(RetryStep::Complete, config.request_timeout, || {
                self.repository.complete_multipart_upload(
                    session.upload_id(),
                    session.file_id(),
                    &parts,
                )
            })
            .await
            .map_err(|cause| {
                warn!(
                    "All {} parts uploaded but session {} was not finalized",
                    total_parts,
                    session.upload_id()
                );
                UploadError::SessionComplete {
                    upload_id: session.upload_id().to_string(),
                    file_id: session.file_id().to_string(),
                    cause,
                }
            })?;

        observer.on_progress(ProgressUpdate {
            percent: 100,
            phase: UploadPhase::Completed,
            state: progress,
        });

        info!(
            "Completed multipart upload of {} as file {}",
            source.name(),
            completed.file_id
        );

        Ok(completed)
    }

    fn check_cancelled(&self, progress: &ProgressState) -> Result<(), UploadError> {
        if self.cancel.is_cancelled() {
            info!(
                "Upload cancelled after {}/{} parts",
                progress.completed_parts, progress.total_parts
            );
            Err(UploadError::Cancelled {
                completed_parts: progress.completed_parts,
                total_parts: progress.total_parts,
            })
        } else {
            Ok(())
        }
    }

    /// タイムアウト付きで呼び出し、リトライ方針に従って再試行する
    async fn call_with_retry<T, F, Fut>(
        &self,
        step: RetryStep,
        timeout: Option<Duration>,
        mut call: F,
    ) -> anyhow::Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let mut attempt = 0;

        loop {
            match with_timeout(timeout, call()).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    attempt += 1;
                    match self.retry_policy.next_delay(step, attempt, &e) {
                        Some(delay) => {
                            warn!(
                                "{:?} failed (attempt {}), retrying in {}ms: {:#}",
                                step,
                                attempt,
                                delay.as_millis(),
                                e
                            );
                            sleep(delay).await;
                        }
                        None => return Err(e),
                    }
                }
            }
        }
    }
}

/// 先に確保するパート一覧の上限（それ以上は送信に合わせて伸ばす）
const MAX_PREALLOCATED_PARTS: u32 = 1024;

fn initial_parts_capacity(total_parts: u32) -> usize {
    total_parts.min(MAX_PREALLOCATED_PARTS) as usize
}

/// タイムアウトを通信失敗として扱う
async fn with_timeout<T, Fut>(timeout: Option<Duration>, future: Fut) -> anyhow::Result<T>
where
    Fut: Future<Output = anyhow::Result<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| anyhow::Error::new(RequestTimeout(limit)))?,
        None => future.await,
    }
}
