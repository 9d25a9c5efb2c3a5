//! # Retry Policy
//!
//! ステップごとのリトライ方針（ストラテジー）

use std::time::Duration;

/// リトライ対象のステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    Init,
    Part(u32),
    Complete,
}

/// リトライ方針
///
/// `attempt` は失敗回数（1始まり）。`None` を返すとそのエラーで終了する
pub trait RetryPolicy: Send + Sync {
    fn next_delay(&self, step: RetryStep, attempt: u32, error: &anyhow::Error)
        -> Option<Duration>;
}

/// リトライしない（デフォルト）。どの失敗もその試行の終了を意味する
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn next_delay(
        &self,
        _step: RetryStep,
        _attempt: u32,
        _error: &anyhow::Error,
    ) -> Option<Duration> {
        None
    }
}
