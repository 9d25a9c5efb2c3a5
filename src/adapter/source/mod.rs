//! Byte Source Implementations
//!
//! Domain層のByteSourceトレイトの実装（ローカルファイル、メモリ）

pub mod local_file;
pub mod memory;
