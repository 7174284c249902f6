use std::path::PathBuf;

use chrono::NaiveDate;
use qc_model::{LotInfo, SampleCategory};
use qc_transform::{
    DescriptiveStats, OutlierBounds, ParetoEntry, ProcessCapability, SpecLimits,
};

#[derive(Debug)]
pub struct PrepareResult {
    pub input: PathBuf,
    /// `None` on a dry run.
    pub output_dir: Option<PathBuf>,
    pub total_rows: usize,
    pub inlier_rows: usize,
    pub outlier_rows: usize,
    /// Rows left after the dashboard filters.
    pub filtered_inlier_rows: usize,
    pub filtered_outlier_rows: usize,
    pub bounds: Option<OutlierBounds>,
    pub stats: Option<DescriptiveStats>,
    pub limits: SpecLimits,
    pub capability: Option<ProcessCapability>,
    pub pareto: Vec<ParetoEntry>,
}

impl PrepareResult {
    /// Rows with no numeric result, in neither partition.
    pub fn excluded_rows(&self) -> usize {
        self.total_rows
            .saturating_sub(self.inlier_rows + self.outlier_rows)
    }
}

#[derive(Debug)]
pub struct CleanReportResult {
    pub output: PathBuf,
    pub input_rows: usize,
    pub output_rows: usize,
}

#[derive(Debug)]
pub struct LotResult {
    pub lot: String,
    pub category: SampleCategory,
    pub info: LotInfo,
    pub final_date: Option<NaiveDate>,
}
