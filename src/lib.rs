//! # chunkup
//!
//! ストレージサービスへのチャンク分割アップロードとファイル管理を行うツール
//!
//! クリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: チャンク計画・進捗・エラーなどのエンティティと、外部依存のトレイト
//! - **Application層**: ユースケース（チャンクアップロード、単発アップロード、ファイル管理、ファイル処理）
//! - **Adapter層**: 外部システムとの統合（HTTP API、ローカルファイル、設定、コンソール）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
