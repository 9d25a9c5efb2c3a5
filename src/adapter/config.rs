//! Configuration
//!
//! JSON設定ファイルの読み込みと環境変数による上書き

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapter::http::retry::{
    ExponentialBackoff, INITIAL_RETRY_DELAY_MS, MAX_RETRIES, MAX_RETRY_DELAY_MS,
};
use crate::application::dto::upload_config::{ChunkUploadConfig, DEFAULT_MAX_FILE_SIZE};
use crate::domain::entities::chunk_plan::DEFAULT_CHUNK_SIZE;
use crate::domain::services::retry_policy::{NoRetry, RetryPolicy};

pub const DEFAULT_CONFIG_PATH: &str = "./chunkup.json";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const ENV_API_BASE_URL: &str = "CHUNKUP_API_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "CHUNKUP_TIMEOUT_MS";
pub const ENV_CHUNK_SIZE: &str = "CHUNKUP_CHUNK_SIZE";
pub const ENV_MAX_FILE_SIZE: &str = "CHUNKUP_MAX_FILE_SIZE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {name}: {value:?}")]
    InvalidOverride { name: &'static str, value: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// リトライ設定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    pub enabled: bool,
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_retries: MAX_RETRIES,
            initial_delay_ms: INITIAL_RETRY_DELAY_MS,
            max_delay_ms: MAX_RETRY_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_ms: u64,
    pub chunk_size: u64,
    pub max_file_size: u64,
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む。ファイルが存在しない場合はデフォルト値
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let path = PathBuf::from(shellexpand::tilde(path).as_ref());

        if !path.exists() {
            info!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        Self::load_file(&path)
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// 任意の検索関数で値を上書き（テスト用に環境変数から切り離している）
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = parse_override(ENV_TIMEOUT_MS, value)?;
        }
        if let Some(value) = lookup(ENV_CHUNK_SIZE) {
            self.chunk_size = parse_override(ENV_CHUNK_SIZE, value)?;
        }
        if let Some(value) = lookup(ENV_MAX_FILE_SIZE) {
            self.max_file_size = parse_override(ENV_MAX_FILE_SIZE, value)?;
        }
        Ok(self)
    }

    /// 環境変数で上書き
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be empty".into()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".into()));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk_size must be positive".into()));
        }
        if self.max_file_size == 0 {
            return Err(ConfigError::Invalid("max_file_size must be positive".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// マルチパート用の設定に変換（CLIのチャンクサイズ指定を優先）
    pub fn to_chunk_upload_config(&self, chunk_size: Option<u64>) -> ChunkUploadConfig {
        ChunkUploadConfig::new(
            chunk_size.unwrap_or(self.chunk_size),
            Some(self.request_timeout()),
        )
    }

    pub fn retry_policy(&self) -> Arc<dyn RetryPolicy> {
        if self.retry.enabled {
            Arc::new(ExponentialBackoff::new(
                self.retry.max_retries,
                self.retry.initial_delay_ms,
                self.retry.max_delay_ms,
            ))
        } else {
            Arc::new(NoRetry)
        }
    }
}

fn parse_override(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride { name, value })
}
