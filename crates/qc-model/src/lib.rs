//! Domain model for QC lab result preparation.
//!
//! Types shared by ingest, transform and the CLI: column names of the lab
//! result table, the sample category classification, lot code fields and
//! the options that drive outlier classification and report cleanup.

pub mod category;
pub mod columns;
pub mod error;
pub mod options;
pub mod record;

pub use category::SampleCategory;
pub use error::{ModelError, Result};
pub use options::{DEFAULT_OUTLIER_FACTOR, OutlierMethod, OutlierOptions, ReportCleanup};
pub use record::{LabRecord, LotInfo, PreparedRecord};
