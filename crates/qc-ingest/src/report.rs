//! Cleanup of the daily LIMS sample report export.
//!
//! The raw export contains results charged to departments that are not part
//! of plant QC and internal calibration tests. Those rows are dropped and the
//! table is narrowed to the columns the dashboard reads.

use polars::prelude::*;
use qc_common::column_text_values;
use qc_model::{ReportCleanup, columns};
use tracing::{info, warn};

use crate::error::Result;
use crate::schema::require_columns;

/// Apply the report cleanup rules and return the narrowed table.
///
/// A missing `Charge department` or `Test` column disables that rule. A
/// missing kept column is an error.
pub fn clean_sample_report(df: &DataFrame, cleanup: &ReportCleanup) -> Result<DataFrame> {
    let keep_names: Vec<&str> = cleanup.keep_columns.iter().map(String::as_str).collect();
    require_columns(df, &keep_names)?;

    let mut keep = vec![true; df.height()];

    match column_text_values(df, columns::CHARGE_DEPARTMENT) {
        Some(departments) => {
            for (flag, department) in keep.iter_mut().zip(departments) {
                if department.is_some_and(|d| cleanup.excluded_departments.contains(&d)) {
                    *flag = false;
                }
            }
        }
        None => warn!(
            column = columns::CHARGE_DEPARTMENT,
            "column missing, department exclusion skipped"
        ),
    }

    match column_text_values(df, columns::TEST) {
        Some(tests) => {
            for (flag, test) in keep.iter_mut().zip(tests) {
                let excluded = test.is_some_and(|code| {
                    cleanup
                        .excluded_test_prefixes
                        .iter()
                        .any(|prefix| code.starts_with(prefix.as_str()))
                });
                if excluded {
                    *flag = false;
                }
            }
        }
        None => warn!(
            column = columns::TEST,
            "column missing, test prefix exclusion skipped"
        ),
    }

    let dropped = keep.iter().filter(|flag| !**flag).count();
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let filtered = df.filter(&mask)?;
    let cleaned = filtered.select(keep_names)?;

    info!(
        input_rows = df.height(),
        dropped_rows = dropped,
        output_rows = cleaned.height(),
        "cleaned sample report"
    );
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;

    fn report() -> DataFrame {
        let mut cols: Vec<Column> = columns::REPORT_COLUMNS
            .iter()
            .map(|name| Column::new((*name).into(), vec!["v1", "v2", "v3", "v4"]))
            .collect();
        cols.push(Column::new(
            columns::CHARGE_DEPARTMENT.into(),
            vec!["QA.MBP", "MFG.MBP", "QA.MBP", "SHE.MBP"],
        ));
        cols.push(Column::new(
            columns::TEST.into(),
            vec!["PH01", "PH01", "CQ-CAL", "MO02"],
        ));
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn test_drops_excluded_rows_and_columns() {
        let cleaned = clean_sample_report(&report(), &ReportCleanup::default()).unwrap();
        assert_eq!(cleaned.height(), 1);
        assert_eq!(cleaned.width(), columns::REPORT_COLUMNS.len());
        assert!(cleaned.column(columns::CHARGE_DEPARTMENT).is_err());
        let lot = cleaned.column(columns::LOT_NUMBER).unwrap();
        assert_eq!(lot.get(0).unwrap(), AnyValue::String("v1"));
    }

    #[test]
    fn test_missing_kept_column_is_error() {
        let df = report().drop(columns::SPEC_CATEGORY).unwrap();
        let err = clean_sample_report(&df, &ReportCleanup::default()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { ref column } if column == "Spec category"));
    }

    #[test]
    fn test_missing_rule_columns_keep_rows() {
        let df = report()
            .drop(columns::CHARGE_DEPARTMENT)
            .unwrap()
            .drop(columns::TEST)
            .unwrap();
        let cleaned = clean_sample_report(&df, &ReportCleanup::default()).unwrap();
        assert_eq!(cleaned.height(), 4);
    }
}
