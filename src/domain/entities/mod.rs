//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **ChunkPlan**: ファイルのパート分割計画
//! - **UploadSession**: マルチパートアップロードのセッション
//! - **ProgressState**: アップロード進捗
//! - **PresignedUrl / ProcessedFile**: 保存済みファイルへの操作結果

pub mod chunk_plan;
pub mod progress;
pub mod stored_file;
pub mod upload_session;
