//! In-Memory Source
//!
//! メモリ上のバイト列をByteSourceとして扱う

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::chunk_plan::ByteRange;
use crate::domain::repositories::byte_source::ByteSource;

/// メモリソース
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    async fn read_range(&self, range: &ByteRange) -> Result<Vec<u8>> {
        let start = usize::try_from(range.start)?;
        let end = usize::try_from(range.end)?;
        self.data
            .get(start..end)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Range {}..{} is outside {} ({} bytes)",
                    range.start,
                    range.end,
                    self.name,
                    self.data.len()
                )
            })
    }
}
