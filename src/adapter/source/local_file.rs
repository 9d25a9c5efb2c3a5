//! Local File Source
//!
//! ローカルファイルを範囲単位で読み出すByteSource実装

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::domain::entities::chunk_plan::ByteRange;
use crate::domain::repositories::byte_source::ByteSource;

/// ローカルファイルソース
///
/// 長さはオープン時に確定する。各パートの読み出しで毎回ファイルを開き直す
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
    name: String,
    len: u64,
}

impl LocalFileSource {
    /// ファイルを開いてサイズを取得
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let expanded = shellexpand::tilde(&path.as_ref().to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);

        let metadata = std::fs::metadata(&path)
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        if !metadata.is_file() {
            anyhow::bail!("Not a regular file: {}", path.display());
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());

        Ok(Self {
            path,
            name,
            len: metadata.len(),
        })
    }

    /// サーバーに申告するファイル名を上書き
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_range_blocking(path: &Path, file_len: u64, range: ByteRange) -> Result<Vec<u8>> {
        if range.end > file_len || range.start > range.end {
            anyhow::bail!(
                "Range {}..{} is outside {} ({} bytes)",
                range.start,
                range.end,
                path.display(),
                file_len
            );
        }

        let mut file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        file.seek(SeekFrom::Start(range.start))
            .with_context(|| format!("Failed to seek {}", path.display()))?;

        let len = usize::try_from(range.len()).context("Range does not fit in memory")?;
        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer).with_context(|| {
            format!(
                "Failed to read bytes {}..{} of {}",
                range.start,
                range.end,
                path.display()
            )
        })?;

        Ok(buffer)
    }
}

#[async_trait]
impl ByteSource for LocalFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.len
    }

    async fn read_range(&self, range: &ByteRange) -> Result<Vec<u8>> {
        let path = self.path.clone();
        let file_len = self.len;
        let range = *range;
        tokio::task::spawn_blocking(move || Self::read_range_blocking(&path, file_len, range))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}
