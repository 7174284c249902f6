//! Lab result ingestion.
//!
//! This crate loads lab result exports into Polars DataFrames and prepares
//! them for the transform stage.
//!
//! # Features
//!
//! - **CSV Loading**: Read exports as text columns with size and encoding guards, write prepared tables back
//! - **Schema Checks**: Report missing required columns once, up front
//! - **Report Cleanup**: Drop excluded departments and calibration tests from the daily export
//! - **Table Cache**: Keep a loaded table for a fixed time-to-live
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use qc_ingest::{read_csv_table, validate_required_columns};
//!
//! let df = read_csv_table(Path::new("data/sample_report.csv"))?;
//! validate_required_columns(&df)?;
//! ```

mod cache;
mod csv;
mod error;
mod report;
mod schema;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, check_file_size_with_limit, read_csv_table, read_csv_table_with_limit,
    validate_encoding, write_csv_table,
};

// === Schema Checks ===
pub use schema::{missing_required_columns, require_columns, validate_required_columns};

// === Report Cleanup ===
pub use report::clean_sample_report;

// === Caching ===
pub use cache::{DEFAULT_TABLE_TTL, TableCache};
