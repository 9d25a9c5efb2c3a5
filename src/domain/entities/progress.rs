//! # Progress Value Objects
//!
//! アップロード進捗の表現

/// アップロードの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// パート送信中
    Uploading,
    /// 全パート送信済み、セッション未確定
    PartsUploaded,
    /// セッション確定済み
    Completed,
}

/// 進捗状態
///
/// 観測専用で、制御には使わない。`completed_parts` は単調増加
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub completed_parts: u32,
    pub total_parts: u32,
}

impl ProgressState {
    pub fn new(total_parts: u32) -> Self {
        Self {
            completed_parts: 0,
            total_parts,
        }
    }

    /// 1パート完了として進める
    pub fn advance(&mut self) {
        if self.completed_parts < self.total_parts {
            self.completed_parts += 1;
        }
    }

    pub fn all_parts_done(&self) -> bool {
        self.completed_parts == self.total_parts
    }

    /// 四捨五入した完了率（0〜100）
    pub fn percent(&self) -> u8 {
        if self.total_parts == 0 {
            return 0;
        }
        let completed = u64::from(self.completed_parts);
        let total = u64::from(self.total_parts);
        ((completed * 200 + total) / (2 * total)).min(100) as u8
    }

    /// 確定前に通知する完了率
    ///
    /// 100 はセッション確定後にのみ通知するため、確定前は 99 で頭打ち
    pub fn pending_percent(&self) -> u8 {
        self.percent().min(99)
    }
}

/// 観測者に渡す進捗通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub percent: u8,
    pub phase: UploadPhase,
    pub state: ProgressState,
}
