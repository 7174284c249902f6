use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use qc_ingest::{clean_sample_report, read_csv_table, validate_required_columns, write_csv_table};
use qc_model::{LabRecord, OutlierOptions};
use qc_transform::{
    DescriptiveStats, RecordFilter, out_of_spec_pareto, parse_receipt_date, prepare_record,
    process_capability, result_values, run_pipeline, spec_limits,
};
use tracing::{info, info_span};

use crate::cli::{CleanReportArgs, LotArgs, PrepareArgs};
use crate::config::Settings;
use crate::types::{CleanReportResult, LotResult, PrepareResult};

pub const INLIERS_FILE: &str = "inliers.csv";
pub const OUTLIERS_FILE: &str = "outliers.csv";

/// Outlier options from the settings file with CLI flags applied on top.
pub fn outlier_options(args: &PrepareArgs, settings: &Settings) -> OutlierOptions {
    let mut options = settings.outliers.clone();
    if let Some(method) = args.method {
        options = options.with_method(method.into());
    }
    if let Some(factor) = args.factor {
        options = options.with_factor(factor);
    }
    if let Some(column) = &args.column {
        options = options.with_column(column.as_str());
    }
    options
}

pub fn record_filter(args: &PrepareArgs) -> RecordFilter {
    RecordFilter::new()
        .with_categories(args.categories.iter().cloned())
        .with_sample_types(args.sample_types.iter().cloned())
        .with_specs(args.specs.iter().cloned())
        .with_tests(args.tests.iter().cloned())
        .with_date_range(args.date_from, args.date_to)
}

pub fn run_prepare(args: &PrepareArgs, settings: &Settings) -> Result<PrepareResult> {
    let input = &args.input;
    let options = outlier_options(args, settings);
    options.validate().context("outlier options")?;
    let filter = record_filter(args);

    let ingest_span = info_span!("ingest", input = %input.display());
    let ingest_start = Instant::now();
    let df = ingest_span.in_scope(|| -> Result<_> {
        let df = read_csv_table(input).with_context(|| format!("load {}", input.display()))?;
        validate_required_columns(&df).context("validate columns")?;
        Ok(df)
    })?;
    info!(
        rows = df.height(),
        columns = df.width(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let transform_span = info_span!("transform", method = %options.method, factor = options.factor);
    let transform_start = Instant::now();
    let split = transform_span.in_scope(|| run_pipeline(&df, &options))?;
    let mut inliers = filter.apply(&split.inliers)?;
    let mut outliers = filter.apply(&split.outliers)?;
    info!(
        inliers = split.inliers.height(),
        outliers = split.outliers.height(),
        filtered_inliers = inliers.height(),
        filtered_outliers = outliers.height(),
        duration_ms = transform_start.elapsed().as_millis(),
        "transform complete"
    );

    let stats = DescriptiveStats::from_values(&result_values(&inliers));
    let limits = spec_limits(&inliers);
    let capability = stats
        .as_ref()
        .and_then(|stats| process_capability(stats, &limits));
    let pareto = out_of_spec_pareto(&inliers);

    let output_dir = if args.dry_run {
        info!("dry run, no files written");
        None
    } else {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(input));
        let output_span = info_span!("output", dir = %dir.display());
        output_span.in_scope(|| -> Result<()> {
            write_csv_table(&mut inliers, &dir.join(INLIERS_FILE)).context("write inliers")?;
            write_csv_table(&mut outliers, &dir.join(OUTLIERS_FILE)).context("write outliers")?;
            Ok(())
        })?;
        Some(dir)
    };

    Ok(PrepareResult {
        input: input.clone(),
        output_dir,
        total_rows: df.height(),
        inlier_rows: split.inliers.height(),
        outlier_rows: split.outliers.height(),
        filtered_inlier_rows: inliers.height(),
        filtered_outlier_rows: outliers.height(),
        bounds: split.bounds,
        stats,
        limits,
        capability,
        pareto,
    })
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("output")
}

pub fn run_clean_report(args: &CleanReportArgs, settings: &Settings) -> Result<CleanReportResult> {
    let span = info_span!("clean_report", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let df = read_csv_table(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    let mut cleaned = clean_sample_report(&df, &settings.report).context("clean report")?;
    write_csv_table(&mut cleaned, &args.output)
        .with_context(|| format!("write {}", args.output.display()))?;

    info!(
        input_rows = df.height(),
        output_rows = cleaned.height(),
        duration_ms = start.elapsed().as_millis(),
        "clean report complete"
    );
    Ok(CleanReportResult {
        output: args.output.clone(),
        input_rows: df.height(),
        output_rows: cleaned.height(),
    })
}

pub fn run_lot(args: &LotArgs) -> LotResult {
    let record = LabRecord::new(args.sample_type.as_deref(), Some(args.lot.as_str()))
        .with_receipt_date(args.receipt_date.as_deref().and_then(parse_receipt_date));
    let prepared = prepare_record(record);
    LotResult {
        lot: args.lot.clone(),
        category: prepared.record.category,
        info: prepared.lot,
        final_date: prepared.final_date,
    }
}
