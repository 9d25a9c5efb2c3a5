//! # Progress Observer
//!
//! 進捗通知の受け口

use crate::domain::entities::progress::ProgressUpdate;

/// 進捗の観測者
///
/// グローバルなUI状態ではなく、呼び出し側が注入する
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, update: ProgressUpdate);
}

impl<F> ProgressObserver for F
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn on_progress(&self, update: ProgressUpdate) {
        self(update)
    }
}

/// 何もしない観測者
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_progress(&self, _update: ProgressUpdate) {}
}
