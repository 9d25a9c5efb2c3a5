//! # Application Layer
//!
//! アップロードとファイル操作のユースケース
//!
//! ## 特徴
//!
//! - Repository traitにのみ依存し、HTTPの詳細は知らない
//! - 設定は `dto` として注入され、環境変数やファイルを直接読まない
//!
//! ## 構成要素
//!
//! - **dto**: アップロード設定
//! - **use_cases**: チャンク/単発アップロード、ファイル管理、ファイル処理

pub mod dto;
pub mod use_cases;
