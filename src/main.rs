//! chunkup - Chunked Storage Uploader
//!
//! ストレージサービスへファイルをチャンク分割でアップロードするCLI

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use chunkup::adapter::config::Config;
use chunkup::driver::{Args, StorageWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration (file, then environment overrides)
    let config = Config::load(&args.config)?.apply_env_overrides()?;

    // Create workflow with injected dependencies
    let workflow = StorageWorkflow::new(config)?;

    workflow.execute(args.command).await
}
