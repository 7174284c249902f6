//! QC lab result preparation.
//!
//! This crate turns raw lab result rows into the tables a QC dashboard
//! renders:
//!
//! - **lot**: lot code parsing into warehouse date, supplier and supplier date
//! - **dates**: receipt date parsing and final date selection per sample category
//! - **numeric**: free-text result normalization
//! - **outliers**: IQR and standard deviation outlier classification
//! - **pipeline**: record and frame preparation, end to end
//! - **filter**: dashboard multi-select and date range filters
//! - **stats**: descriptive statistics, spec limits and process capability
//! - **pareto**: out-of-spec counts per test

pub mod dates;
pub mod error;
pub mod filter;
pub mod lot;
pub mod numeric;
pub mod outliers;
pub mod pareto;
pub mod pipeline;
pub mod stats;

pub use dates::{parse_receipt_date, unify_date};
pub use error::{Result, TransformError};
pub use filter::RecordFilter;
pub use lot::{INTERNAL_SUPPLIER, parse_lot_date, parse_lot_number};
pub use numeric::{normalize_optional_result, normalize_result};
pub use outliers::{
    FrameSplit, OutlierBounds, OutlierPartition, classifier_column, compute_bounds,
    partition_values, split_outliers,
};
pub use pareto::{ParetoEntry, out_of_spec_pareto};
pub use pipeline::{prepare_frame, prepare_record, prepare_records, records_from_frame, run_pipeline};
pub use stats::{
    DescriptiveStats, ProcessCapability, SpecLimits, process_capability, result_values,
    spec_limits,
};
