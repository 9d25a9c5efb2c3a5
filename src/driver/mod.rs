//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **workflow**: コマンドごとのワークフロー（依存関係の組み立て）

pub mod cli;
pub mod workflow;

pub use cli::{Args, Command, UploadMode};
pub use workflow::StorageWorkflow;
