//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - フレームワークに依存しない
//! - HTTPやファイルシステムについて何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（ChunkPlan, UploadSessionなど）
//! - **errors**: アップロードエラーの分類
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（進捗通知、リトライ方針）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
