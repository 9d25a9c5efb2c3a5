//! # Byte Source Trait
//!
//! アップロード元のバイト列を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::chunk_plan::ByteRange;

/// バイトソース
///
/// 長さが既知で、任意の範囲を読み出せるデータ源。
/// パートごとに必要な範囲だけを読むので、メモリに載るのは常に1チャンク分
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// サーバーに申告するファイル名
    fn name(&self) -> &str;

    /// 全体のバイト数
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 指定範囲を読み出す
    ///
    /// # Errors
    ///
    /// 読み込みに失敗した場合、または範囲がソースの外にある場合にエラーを返す
    async fn read_range(&self, range: &ByteRange) -> Result<Vec<u8>>;

    /// 全体を読み出す
    async fn read_all(&self) -> Result<Vec<u8>> {
        let range = ByteRange {
            part_number: 1,
            start: 0,
            end: self.len(),
        };
        self.read_range(&range).await
    }
}
