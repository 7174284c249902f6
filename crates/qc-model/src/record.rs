//! Lab result records and the fields derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::SampleCategory;

/// Fields extracted from a lot code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotInfo {
    /// Date the batch entered the warehouse. Raw material and packaging only.
    pub warehouse_date: Option<NaiveDate>,
    /// Supplier batch date (or the only lot date for other categories).
    pub supplier_date: Option<NaiveDate>,
    /// Supplier code; absent for internal lots.
    pub supplier_name: Option<String>,
}

impl LotInfo {
    pub fn is_empty(&self) -> bool {
        self.warehouse_date.is_none() && self.supplier_date.is_none() && self.supplier_name.is_none()
    }
}

/// One raw lab result row, already classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabRecord {
    pub sample_type: Option<String>,
    pub category: SampleCategory,
    pub lot_number: Option<String>,
    pub receipt_date: Option<NaiveDate>,
    pub actual_result: Option<String>,
}

impl LabRecord {
    /// Create a record, classifying the sample type label.
    pub fn new(sample_type: Option<&str>, lot_number: Option<&str>) -> Self {
        Self {
            sample_type: sample_type.map(str::to_string),
            category: SampleCategory::classify(sample_type),
            lot_number: lot_number.map(str::to_string),
            receipt_date: None,
            actual_result: None,
        }
    }

    #[must_use]
    pub fn with_receipt_date(mut self, date: Option<NaiveDate>) -> Self {
        self.receipt_date = date;
        self
    }

    #[must_use]
    pub fn with_actual_result(mut self, result: Option<&str>) -> Self {
        self.actual_result = result.map(str::to_string);
        self
    }
}

/// A record with every derived field computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedRecord {
    pub record: LabRecord,
    pub lot: LotInfo,
    pub final_date: Option<NaiveDate>,
    pub actual_result_numeric: Option<f64>,
}
