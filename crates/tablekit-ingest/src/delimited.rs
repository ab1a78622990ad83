//! CSV reading with per-cell type detection.

use std::io::Read;
use std::path::Path;

use tablekit_model::{FieldValue, Row, parse_f64};

use crate::error::{IngestError, Result};
use crate::file::{LoadedTable, read_error};

/// Read a CSV file whose first row is the header.
pub fn read_csv_file(path: &Path) -> Result<LoadedTable> {
    let file = std::fs::File::open(path).map_err(|e| read_error(path, e))?;
    read_csv(file, path)
}

/// Read CSV from any reader. `path` is used for error messages only.
pub fn read_csv<R: Read>(input: R, path: &Path) -> Result<LoadedTable> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();
    if let Some(index) = columns.iter().position(|name| name.is_empty()) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
            index,
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        if record.len() != columns.len() {
            tracing::warn!(
                path = %path.display(),
                line = record.position().map(csv::Position::line),
                expected = columns.len(),
                found = record.len(),
                "ragged CSV row"
            );
        }
        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), parse_cell(cell)))
            .collect();
        rows.push(row);
    }

    Ok(LoadedTable { columns, rows })
}

/// Detect the value type of a single CSV cell.
///
/// Empty cells are `Missing`, `true`/`false` are booleans, finite numbers
/// are numbers, and everything else is text.
pub fn parse_cell(cell: &str) -> FieldValue {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return FieldValue::Missing;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return FieldValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return FieldValue::Bool(false);
    }
    match parse_f64(trimmed) {
        Some(number) => FieldValue::Number(number),
        None => FieldValue::Text(cell.to_string()),
    }
}
