//! JSON array-of-objects reading.

use std::path::Path;

use serde_json::Value;
use tablekit_model::{FieldValue, Row};

use crate::error::{IngestError, Result};
use crate::file::{LoadedTable, read_error};

/// Read a JSON file holding an array of objects.
pub fn read_json_file(path: &Path) -> Result<LoadedTable> {
    let text = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    read_json(&text, path)
}

/// Parse a JSON array of objects. `path` is used for error messages only.
///
/// Columns are the union of every object's keys, in the order they are
/// first seen.
pub fn read_json(text: &str, path: &Path) -> Result<LoadedTable> {
    let document: Value = serde_json::from_str(text).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = document else {
        return Err(IngestError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(map) = item else {
            return Err(IngestError::NotAnObject {
                path: path.to_path_buf(),
                index,
            });
        };
        for key in map.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        let row: Row = map
            .into_iter()
            .map(|(key, value)| (key, FieldValue::from(value)))
            .collect();
        rows.push(row);
    }

    Ok(LoadedTable { columns, rows })
}
