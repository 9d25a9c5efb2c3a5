//! CLI Argument Parsing
//!
//! CLIの引数解析

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::adapter::config::DEFAULT_CONFIG_PATH;
use crate::domain::entities::stored_file::{
    DocumentOperation, ImageOperation, DEFAULT_PRESIGNED_EXPIRE_SECONDS,
};

/// ストレージサービスへのアップロードとファイル管理を行うCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "chunkup")]
#[command(about = "Upload files to the storage service in chunks and manage stored files", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

/// アップロード方式
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// One request, file id returned when stored
    Simple,
    /// One request, stored in the background
    Async,
    /// Chunked multipart session with progress
    Multipart,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Upload a local file
    Upload {
        /// File to upload
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = UploadMode::Multipart)]
        mode: UploadMode,

        /// Part size in bytes (multipart mode only)
        #[arg(long)]
        chunk_size: Option<u64>,

        /// Log progress instead of printing it (multipart mode only)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Download a stored file
    Download {
        file_id: String,
        /// Destination path
        output: PathBuf,
    },

    /// Delete a stored file
    Delete { file_id: String },

    /// Issue a signed download URL
    Presign {
        file_id: String,

        #[arg(long, default_value_t = DEFAULT_PRESIGNED_EXPIRE_SECONDS)]
        expire_seconds: u64,
    },

    /// Run an image operation (compress, convert, watermark, crop)
    ProcessImage {
        file_id: String,
        operation: ImageOperation,

        /// Operation parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },

    /// Run a document operation (generatePdf, importExcel, exportExcel)
    ProcessDocument {
        file_id: String,
        operation: DocumentOperation,

        /// Operation parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },
}
