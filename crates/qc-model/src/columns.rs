//! Column names of the lab result table.
//!
//! Source names match the LIMS sample report export exactly; derived names
//! are the columns appended by the preparation pipeline.

pub const SAMPLE_TYPE: &str = "Sample Type";
pub const LOT_NUMBER: &str = "Lot number";
pub const RECEIPT_DATE: &str = "Receipt Date";
pub const ACTUAL_RESULT: &str = "Actual result";
pub const SAMPLE_NAME: &str = "Sample Name";
pub const TEST: &str = "Test";
pub const TEST_DESCRIPTION: &str = "Test description";
pub const LOWER_LIMIT: &str = "Lower limit";
pub const UPPER_LIMIT: &str = "Upper limit";
pub const CATEGORY_DESCRIPTION: &str = "Category description";
pub const SPEC_DESCRIPTION: &str = "Spec description";
pub const SPEC_CATEGORY: &str = "Spec category";
pub const CHARGE_DEPARTMENT: &str = "Charge department";

pub const WAREHOUSE_DATE: &str = "warehouse_date";
pub const SUPPLIER_DATE: &str = "supplier_date";
pub const SUPPLIER_NAME: &str = "supplier_name";
pub const FINAL_DATE: &str = "final_date";
pub const ACTUAL_RESULT_NUMERIC: &str = "actual_result_numeric";

/// Columns the preparation pipeline cannot run without.
pub const REQUIRED_COLUMNS: &[&str] = &[SAMPLE_TYPE, LOT_NUMBER, ACTUAL_RESULT];

/// Columns appended by the pipeline, in output order.
pub const DERIVED_COLUMNS: &[&str] = &[
    WAREHOUSE_DATE,
    SUPPLIER_DATE,
    SUPPLIER_NAME,
    FINAL_DATE,
    ACTUAL_RESULT_NUMERIC,
];

/// Columns kept when cleaning a raw sample report export.
pub const REPORT_COLUMNS: &[&str] = &[
    RECEIPT_DATE,
    SAMPLE_NAME,
    SAMPLE_TYPE,
    LOT_NUMBER,
    TEST_DESCRIPTION,
    ACTUAL_RESULT,
    LOWER_LIMIT,
    UPPER_LIMIT,
    CATEGORY_DESCRIPTION,
    SPEC_DESCRIPTION,
    SPEC_CATEGORY,
];

/// Date format used for derived date columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
