//! Column presence checks for lab result tables.

use polars::prelude::DataFrame;
use qc_common::has_column;
use qc_model::columns;

use crate::error::{IngestError, Result};

/// Check that every required column is present.
///
/// Returns the first missing column as [`IngestError::MissingColumn`].
/// The optional `Receipt Date` column is not checked.
pub fn validate_required_columns(df: &DataFrame) -> Result<()> {
    require_columns(df, columns::REQUIRED_COLUMNS)
}

/// Check that each named column is present.
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    match names.iter().find(|name| !has_column(df, name)) {
        Some(missing) => Err(IngestError::MissingColumn {
            column: (*missing).to_string(),
        }),
        None => Ok(()),
    }
}

/// Names of required columns absent from the table.
pub fn missing_required_columns(df: &DataFrame) -> Vec<&'static str> {
    columns::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| !has_column(df, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataFrame};

    fn frame(names: &[&str]) -> DataFrame {
        let cols = names
            .iter()
            .map(|name| Column::new((*name).into(), vec!["x"]))
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn test_all_required_present() {
        let df = frame(&["Sample Type", "Lot number", "Actual result"]);
        assert!(validate_required_columns(&df).is_ok());
        assert!(missing_required_columns(&df).is_empty());
    }

    #[test]
    fn test_receipt_date_is_optional() {
        let df = frame(&["Sample Type", "Lot number", "Actual result", "Test description"]);
        assert!(validate_required_columns(&df).is_ok());
    }

    #[test]
    fn test_missing_column_reported() {
        let df = frame(&["Sample Type", "Actual result"]);
        let err = validate_required_columns(&df).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { ref column } if column == "Lot number"));
        assert_eq!(missing_required_columns(&df), vec!["Lot number"]);
    }
}
