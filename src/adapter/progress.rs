//! Progress Reporters
//!
//! ProgressObserverの実装（ログ出力、コンソール表示）

use std::sync::atomic::{AtomicU8, Ordering};

use log::info;

use crate::domain::entities::progress::{ProgressUpdate, UploadPhase};
use crate::domain::services::progress_observer::ProgressObserver;

/// 進捗を1行の文字列にする
pub fn format_update(file_name: &str, update: &ProgressUpdate) -> String {
    let phase = match update.phase {
        UploadPhase::Uploading => "uploading",
        UploadPhase::PartsUploaded => "finalizing",
        UploadPhase::Completed => "completed",
    };
    format!(
        "{} {:>3}% ({}/{} parts, {})",
        file_name,
        update.percent,
        update.state.completed_parts,
        update.state.total_parts,
        phase
    )
}

/// `info!` で進捗を記録する
pub struct LogProgress {
    file_name: String,
}

impl LogProgress {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl ProgressObserver for LogProgress {
    fn on_progress(&self, update: ProgressUpdate) {
        info!("{}", format_update(&self.file_name, &update));
    }
}

/// 標準出力に進捗を表示する。同じ完了率は二度表示しない
pub struct ConsoleProgress {
    file_name: String,
    last_percent: AtomicU8,
}

impl ConsoleProgress {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            last_percent: AtomicU8::new(u8::MAX),
        }
    }

    /// 表示すべき更新なら `true`
    fn should_print(&self, update: &ProgressUpdate) -> bool {
        let previous = self.last_percent.swap(update.percent, Ordering::Relaxed);
        previous != update.percent || update.phase == UploadPhase::Completed
    }
}

impl ProgressObserver for ConsoleProgress {
    fn on_progress(&self, update: ProgressUpdate) {
        if self.should_print(&update) {
            println!("  {}", format_update(&self.file_name, &update));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::progress::ProgressState;

    fn update(percent: u8, phase: UploadPhase, completed: u32, total: u32) -> ProgressUpdate {
        ProgressUpdate {
            percent,
            phase,
            state: ProgressState {
                completed_parts: completed,
                total_parts: total,
            },
        }
    }

    #[test]
    fn test_format_update() {
        assert_eq!(
            format_update("video.mp4", &update(40, UploadPhase::Uploading, 2, 5)),
            "video.mp4  40% (2/5 parts, uploading)"
        );
        assert_eq!(
            format_update("video.mp4", &update(99, UploadPhase::PartsUploaded, 5, 5)),
            "video.mp4  99% (5/5 parts, finalizing)"
        );
    }

    #[test]
    fn test_console_progress_skips_repeated_percent() {
        let progress = ConsoleProgress::new("big.iso");

        assert!(progress.should_print(&update(0, UploadPhase::Uploading, 0, 300)));
        assert!(!progress.should_print(&update(0, UploadPhase::Uploading, 1, 300)));
        assert!(progress.should_print(&update(1, UploadPhase::Uploading, 3, 300)));
        assert!(progress.should_print(&update(100, UploadPhase::Completed, 300, 300)));
    }

    #[test]
    fn test_log_progress_accepts_updates() {
        let progress = LogProgress::new("notes.txt");
        let observer: &dyn ProgressObserver = &progress;
        observer.on_progress(update(50, UploadPhase::Uploading, 1, 2));
        observer.on_progress(update(100, UploadPhase::Completed, 2, 2));
    }
}
