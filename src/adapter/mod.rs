//! Adapter Layer
//!
//! 外部システム（ストレージAPI、ファイルシステム、設定、コンソール）との統合

pub mod config;
pub mod http;
pub mod progress;
pub mod repositories;
pub mod source;
