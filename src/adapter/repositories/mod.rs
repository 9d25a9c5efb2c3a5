//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod http_processing_repository;
pub mod http_storage_repository;
