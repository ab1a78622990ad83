//! File checks and format dispatch.

use std::path::Path;

use tablekit_model::Row;

use crate::error::{IngestError, Result};
use crate::{delimited, json};

/// Maximum input size accepted by [`load_records`] (100 MB).
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Records plus their column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedTable {
    /// Column names in source order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Load a CSV or JSON file, chosen by extension.
///
/// # Errors
///
/// Fails when the file is missing, too large, has an unknown extension, or
/// does not parse.
pub fn load_records(path: &Path) -> Result<LoadedTable> {
    let format = InputFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    check_file_size(path)?;
    let table = match format {
        InputFormat::Csv => delimited::read_csv_file(path)?,
        InputFormat::Json => json::read_json_file(path)?,
    };
    tracing::info!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.columns.len(),
        "loaded records"
    );
    Ok(table)
}

pub(crate) fn read_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.CSV")), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_path(Path::new("a.json")), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_path(Path::new("a.xlsx")), None);
        assert_eq!(InputFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_unsupported_format() {
        let err = load_records(Path::new("records.xlsx")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_file() {
        let path = PathBuf::from("definitely/not/here.csv");
        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
