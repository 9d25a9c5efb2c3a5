//! Storage API HTTP Adapter
//!
//! ストレージ/ファイル処理APIとのHTTP通信

pub mod client;
pub mod models;
pub mod retry;
