//! Record loading from CSV and JSON files.
//!
//! The engines only ever see `Row` collections; this crate is where those
//! collections come from when the caller works with files.

pub mod delimited;
pub mod error;
pub mod file;
pub mod json;

pub use error::{IngestError, Result};
pub use file::{
    InputFormat, LoadedTable, MAX_FILE_SIZE, check_file_size, check_file_size_with_limit,
    load_records,
};
