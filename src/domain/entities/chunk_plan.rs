//! # ChunkPlan Value Object
//!
//! ファイルをパート単位のバイト範囲に分割する計画

use crate::domain::errors::UploadError;

/// デフォルトのチャンクサイズ（5MB）
pub const DEFAULT_CHUNK_SIZE: u64 = 5_242_880;

/// 1パート分のバイト範囲 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// パート番号（1始まり）
    pub part_number: u32,
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// 範囲のバイト数
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// チャンク分割計画
///
/// `[0, file_size)` を隙間も重なりもなく覆う連続した範囲の列。
/// 最後の範囲以外はすべて `chunk_size` バイト。永続化はしない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    file_size: u64,
    chunk_size: u64,
    total_parts: u32,
}

impl ChunkPlan {
    /// 新しい分割計画を作成
    ///
    /// # Errors
    ///
    /// `file_size` または `chunk_size` が0の場合、またはパート数が
    /// `u32` に収まらない場合に `UploadError::InvalidInput` を返す
    ///
    /// # 例
    ///
    /// ```
    /// use chunkup::domain::entities::chunk_plan::{ChunkPlan, DEFAULT_CHUNK_SIZE};
    ///
    /// let plan = ChunkPlan::new(12_000_000, DEFAULT_CHUNK_SIZE).unwrap();
    /// assert_eq!(plan.total_parts(), 3);
    ///
    /// let last = plan.range(3).unwrap();
    /// assert_eq!(last.start, 10_485_760);
    /// assert_eq!(last.len(), 1_514_240);
    ///
    /// assert!(ChunkPlan::new(0, DEFAULT_CHUNK_SIZE).is_err());
    /// ```
    pub fn new(file_size: u64, chunk_size: u64) -> Result<Self, UploadError> {
        if file_size == 0 {
            return Err(UploadError::InvalidInput(
                "file is empty (0 bytes)".to_string(),
            ));
        }
        if chunk_size == 0 {
            return Err(UploadError::InvalidInput(
                "chunk size must be positive".to_string(),
            ));
        }

        let total_parts = u32::try_from(file_size.div_ceil(chunk_size)).map_err(|_| {
            UploadError::InvalidInput(format!(
                "{} bytes in chunks of {} needs too many parts",
                file_size, chunk_size
            ))
        })?;

        Ok(Self {
            file_size,
            chunk_size,
            total_parts,
        })
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// パート数 `ceil(file_size / chunk_size)`
    pub fn total_parts(&self) -> u32 {
        self.total_parts
    }

    /// 指定パート番号のバイト範囲（範囲外なら `None`）
    pub fn range(&self, part_number: u32) -> Option<ByteRange> {
        if part_number == 0 || part_number > self.total_parts {
            return None;
        }

        let start = u64::from(part_number - 1) * self.chunk_size;
        let end = start.saturating_add(self.chunk_size).min(self.file_size);

        Some(ByteRange {
            part_number,
            start,
            end,
        })
    }

    /// 全範囲をパート番号の昇順で返す
    pub fn ranges(&self) -> impl Iterator<Item = ByteRange> + '_ {
        (1..=self.total_parts).filter_map(move |n| self.range(n))
    }
}
