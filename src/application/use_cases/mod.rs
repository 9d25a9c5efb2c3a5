//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ChunkedUploadUseCase**: 大きなファイルのマルチパートアップロード
//! - **SimpleUploadUseCase**: 通常/非同期の単発アップロード
//! - **ManageFilesUseCase**: ダウンロード・削除・署名URL
//! - **ProcessFileUseCase**: 画像・文書処理

pub mod chunked_upload;
pub mod manage_files;
pub mod process_file;
pub mod simple_upload;
