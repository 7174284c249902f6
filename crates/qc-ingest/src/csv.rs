//! CSV loading for lab result exports.
//!
//! Every column is read as text. Spreadsheet exports mix numbers, units and
//! free-text annotations in the same column, so typing is left to the
//! transform stage. Prepared tables are written back with a header row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (200 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 200 * 1024 * 1024;

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Reject UTF-16 exports. A UTF-8 BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        match buffer {
            [0xFF, 0xFE] => {
                return Err(IngestError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 LE",
                });
            }
            [0xFE, 0xFF] => {
                return Err(IngestError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 BE",
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Reads a lab result CSV into a DataFrame of text columns.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    read_csv_table_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Reads a lab result CSV with a custom size limit.
pub fn read_csv_table_with_limit(path: &Path, max_size: u64) -> Result<DataFrame> {
    check_file_size_with_limit(path, max_size)?;
    validate_encoding(path)?;

    let parse_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        // All columns as String
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    if df.height() == 0 {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    if df.width() > 200 {
        warn!(
            path = %path.display(),
            columns = df.width(),
            "export has an unusually wide header"
        );
    }

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded CSV table"
    );
    Ok(df)
}

/// Writes a table as CSV with a header row, creating parent directories.
pub fn write_csv_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let write_error = |e: std::io::Error| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let mut file = File::create(path).map_err(write_error)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(path = %path.display(), rows = df.height(), "wrote CSV table");
    Ok(())
}
