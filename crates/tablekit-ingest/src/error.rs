//! Error types for record ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading records from disk.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Extension is neither `.csv` nor `.json`.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Header row contains an empty column name.
    #[error("empty column name at position {index} in {path}")]
    EmptyColumnName { path: PathBuf, index: usize },

    /// Failed to parse JSON.
    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON document is not an array of records.
    #[error("expected a JSON array of objects in {path}")]
    NotAnArray { path: PathBuf },

    /// JSON array element is not an object.
    #[error("element {index} in {path} is not an object")]
    NotAnObject { path: PathBuf, index: usize },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
