//! Record and frame level preparation.
//!
//! `prepare_frame` appends the derived columns to a raw lab result table;
//! `run_pipeline` prepares the table and splits it into inliers and
//! outliers. Both are pure: the same input always gives the same output, and
//! preparing an already prepared table changes nothing.

use chrono::NaiveDate;
use polars::prelude::*;
use qc_common::{column_text_values, float_column, text_column};
use qc_model::columns::{
    ACTUAL_RESULT, ACTUAL_RESULT_NUMERIC, DATE_FORMAT, FINAL_DATE, LOT_NUMBER, RECEIPT_DATE,
    SAMPLE_TYPE, SUPPLIER_DATE, SUPPLIER_NAME, WAREHOUSE_DATE,
};
use qc_model::{LabRecord, OutlierOptions, PreparedRecord};
use tracing::{debug, warn};

use crate::dates::{parse_receipt_date, unify_date};
use crate::error::Result;
use crate::lot::parse_lot_number;
use crate::numeric::normalize_optional_result;
use crate::outliers::{FrameSplit, split_outliers};

/// Derive lot fields, final date and numeric result for one record.
pub fn prepare_record(record: LabRecord) -> PreparedRecord {
    let lot = parse_lot_number(record.lot_number.as_deref(), record.category);
    let final_date = unify_date(record.category, &lot, record.receipt_date);
    let actual_result_numeric = normalize_optional_result(record.actual_result.as_deref());
    PreparedRecord {
        record,
        lot,
        final_date,
        actual_result_numeric,
    }
}

pub fn prepare_records(records: Vec<LabRecord>) -> Vec<PreparedRecord> {
    records.into_iter().map(prepare_record).collect()
}

fn text_values_or_absent(df: &DataFrame, name: &str, required: bool) -> Vec<Option<String>> {
    column_text_values(df, name).unwrap_or_else(|| {
        if required {
            warn!(column = name, "column missing, values treated as absent");
        }
        vec![None; df.height()]
    })
}

/// Read the source columns of a table into records.
///
/// Missing columns read as absent values. `Sample Type`, `Lot number` and
/// `Actual result` are expected, so their absence is logged; `Receipt Date`
/// is optional.
pub fn records_from_frame(df: &DataFrame) -> Vec<LabRecord> {
    let sample_types = text_values_or_absent(df, SAMPLE_TYPE, true);
    let lot_numbers = text_values_or_absent(df, LOT_NUMBER, true);
    let results = text_values_or_absent(df, ACTUAL_RESULT, true);
    let receipt_dates = text_values_or_absent(df, RECEIPT_DATE, false);

    sample_types
        .iter()
        .zip(&lot_numbers)
        .zip(&results)
        .zip(&receipt_dates)
        .map(|(((sample_type, lot), result), receipt)| {
            LabRecord::new(sample_type.as_deref(), lot.as_deref())
                .with_receipt_date(receipt.as_deref().and_then(parse_receipt_date))
                .with_actual_result(result.as_deref())
        })
        .collect()
}

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

/// Append the derived columns to a raw table.
///
/// Date columns are ISO `YYYY-MM-DD` text. Existing derived columns are
/// replaced in place, so running this twice gives the same table.
pub fn prepare_frame(df: &DataFrame) -> Result<DataFrame> {
    let prepared = prepare_records(records_from_frame(df));

    let mut warehouse = Vec::with_capacity(prepared.len());
    let mut supplier_dates = Vec::with_capacity(prepared.len());
    let mut suppliers = Vec::with_capacity(prepared.len());
    let mut final_dates = Vec::with_capacity(prepared.len());
    let mut numeric = Vec::with_capacity(prepared.len());
    for record in prepared {
        warehouse.push(format_date(record.lot.warehouse_date));
        supplier_dates.push(format_date(record.lot.supplier_date));
        suppliers.push(record.lot.supplier_name);
        final_dates.push(format_date(record.final_date));
        numeric.push(record.actual_result_numeric);
    }

    let mut out = df.clone();
    out.with_column(text_column(WAREHOUSE_DATE, warehouse))?;
    out.with_column(text_column(SUPPLIER_DATE, supplier_dates))?;
    out.with_column(text_column(SUPPLIER_NAME, suppliers))?;
    out.with_column(text_column(FINAL_DATE, final_dates))?;
    out.with_column(float_column(ACTUAL_RESULT_NUMERIC, numeric))?;

    debug!(rows = out.height(), "derived columns appended");
    Ok(out)
}

/// Prepare a raw table and split it into inliers and outliers.
///
/// Options are validated before any work is done.
pub fn run_pipeline(df: &DataFrame, options: &OutlierOptions) -> Result<FrameSplit> {
    options.validate()?;
    let prepared = prepare_frame(df)?;
    split_outliers(&prepared, options)
}
