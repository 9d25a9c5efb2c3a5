//! HTTP Retry Logic and Error Classification
//!
//! リトライロジックとエラー分類

use std::io::ErrorKind;
use std::time::Duration;

use reqwest::StatusCode;

use crate::adapter::http::client::HttpStatusError;
use crate::domain::errors::RequestTimeout;
use crate::domain::services::retry_policy::{RetryPolicy, RetryStep};

pub const MAX_RETRIES: u32 = 5;
pub const INITIAL_RETRY_DELAY_MS: u64 = 1000; // 1 second
pub const MAX_RETRY_DELAY_MS: u64 = 32000; // 32 seconds max

/// Calculate retry delay with exponential backoff
pub fn calculate_retry_delay(retry_count: u32, initial_ms: u64, max_ms: u64) -> u64 {
    let shift = retry_count.saturating_sub(1).min(31);
    std::cmp::min(initial_ms.saturating_mul(1u64 << shift), max_ms)
}

/// Check if an HTTP status is worth retrying (5xx or 429)
pub fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Check if an I/O error comes from a broken or refused connection
pub fn is_connection_io_error(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::BrokenPipe
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionAborted
            | ErrorKind::UnexpectedEof
            | ErrorKind::TimedOut
    )
}

/// Check if a reqwest error is a transport failure or carries a retryable status
fn is_retryable_reqwest_error(error: &reqwest::Error) -> bool {
    if let Some(status) = error.status() {
        return is_retryable_status(status);
    }
    error.is_timeout() || error.is_connect() || error.is_request() || error.is_body()
}

/// Classify an error by the typed causes in its chain
///
/// Only structured causes count: the message text is never inspected.
pub fn is_retryable_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        if let Some(status_error) = cause.downcast_ref::<HttpStatusError>() {
            is_retryable_status(status_error.status)
        } else if let Some(reqwest_error) = cause.downcast_ref::<reqwest::Error>() {
            is_retryable_reqwest_error(reqwest_error)
        } else if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            is_connection_io_error(io_error)
        } else {
            cause.downcast_ref::<RequestTimeout>().is_some()
        }
    })
}

/// Exponential backoff for retryable errors, same limits for every step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExponentialBackoff {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl ExponentialBackoff {
    pub fn new(max_retries: u32, initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay_ms,
            max_delay_ms,
        }
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(MAX_RETRIES, INITIAL_RETRY_DELAY_MS, MAX_RETRY_DELAY_MS)
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn next_delay(
        &self,
        _step: RetryStep,
        attempt: u32,
        error: &anyhow::Error,
    ) -> Option<Duration> {
        if attempt > self.max_retries {
            return None;
        }
        if !is_retryable_error(error) {
            return None;
        }
        Some(Duration::from_millis(calculate_retry_delay(
            attempt,
            self.initial_delay_ms,
            self.max_delay_ms,
        )))
    }
}
