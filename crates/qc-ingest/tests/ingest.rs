//! Integration tests for loading and cleaning sample report exports.

use std::io::Write;

use polars::prelude::AnyValue;
use qc_ingest::{
    IngestError, TableCache, clean_sample_report, read_csv_table, validate_required_columns,
};
use qc_model::ReportCleanup;
use tempfile::NamedTempFile;

const EXPORT: &str = "\
Receipt Date,Sample Name,Sample Type,Lot number,Test,Test description,Actual result,Lower limit,Upper limit,Category description,Spec description,Spec category,Charge department
2025-01-03,Sugar,RM - Raw material,020125-KIB08-291224-MBP,MO01,Moisture,\"12,5 %\",10,14,Sweetener,Sugar spec,RM,QA.MBP
2025-01-03,Sugar,RM - Raw material,020125-KIB08-291224-MBP,CQ01,Balance check,1,,,Sweetener,Sugar spec,RM,QA.MBP
2025-01-04,Carton,PG - Packaging,030125-MBP,TH01,Thickness,0.8 mm,0.5,1,Carton,Carton spec,PG,MFG.MBP
";

fn write_export() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(EXPORT.as_bytes()).unwrap();
    file
}

#[test]
fn load_validate_and_clean_export() {
    let file = write_export();
    let df = read_csv_table(file.path()).unwrap();
    assert_eq!(df.height(), 3);
    validate_required_columns(&df).unwrap();

    let cleaned = clean_sample_report(&df, &ReportCleanup::default()).unwrap();
    assert_eq!(cleaned.height(), 1);
    assert!(cleaned.column("Test").is_err());
    let result = cleaned.column("Actual result").unwrap().get(0).unwrap();
    assert_eq!(result, AnyValue::String("12,5 %"));
}

#[test]
fn cleaned_report_without_required_column_is_rejected() {
    let file = write_export();
    let df = read_csv_table(file.path()).unwrap();
    let df = df.drop("Actual result").unwrap();
    let err = validate_required_columns(&df).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { .. }));
}

#[test]
fn cache_wraps_csv_loader() {
    let file = write_export();
    let mut cache = TableCache::default();
    let rows = cache
        .get_or_load(|| read_csv_table(file.path()))
        .unwrap()
        .height();
    assert_eq!(rows, 3);
    assert!(cache.is_fresh());
}
