//! Descriptive statistics and process capability.

use polars::prelude::*;
use qc_common::column_text_values;
use qc_model::columns::{ACTUAL_RESULT, ACTUAL_RESULT_NUMERIC, LOWER_LIMIT, UPPER_LIMIT};
use serde::Serialize;

use crate::outliers::{coerce_numeric_column, mean, sample_std};

/// Summary of a set of result values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            count: values.len(),
            mean,
            std: sample_std(values),
            min,
            max,
        })
    }
}

/// Numeric result of each row.
///
/// Reads `actual_result_numeric` when the table is prepared, otherwise
/// normalizes `Actual result`. `None` when neither column exists.
pub fn result_values_by_row(df: &DataFrame) -> Option<Vec<Option<f64>>> {
    coerce_numeric_column(df, ACTUAL_RESULT_NUMERIC)
        .or_else(|| coerce_numeric_column(df, ACTUAL_RESULT))
}

/// Present numeric results of a table.
pub fn result_values(df: &DataFrame) -> Vec<f64> {
    result_values_by_row(df)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect()
}

/// Lower and upper specification limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpecLimits {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl SpecLimits {
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// True when `value` lies strictly outside a present limit.
    pub fn is_out_of_spec(&self, value: f64) -> bool {
        self.lower.is_some_and(|lsl| value < lsl) || self.upper.is_some_and(|usl| value > usl)
    }
}

/// Parse a limit cell such as `"0,5"` or `" 12 "`.
///
/// The whole cell must be a number; text like `"max 5"` is not a limit.
pub fn parse_limit(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Limits of a filtered table, read from its first row.
pub fn spec_limits(df: &DataFrame) -> SpecLimits {
    let first = |column: &str| {
        column_text_values(df, column)
            .and_then(|values| values.into_iter().next().flatten())
            .and_then(|raw| parse_limit(&raw))
    };
    SpecLimits {
        lower: first(LOWER_LIMIT),
        upper: first(UPPER_LIMIT),
    }
}

/// Process capability indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProcessCapability {
    /// Potential capability; needs both limits.
    pub cp: Option<f64>,
    /// Actual capability; one-sided when only one limit is present.
    pub cpk: f64,
}

/// Compute Cp and Cpk.
///
/// Returns `None` when there is no limit or the standard deviation is zero
/// or undefined.
pub fn process_capability(
    stats: &DescriptiveStats,
    limits: &SpecLimits,
) -> Option<ProcessCapability> {
    let sigma = stats.std.filter(|s| *s > 0.0)?;
    let upper_index = limits.upper.map(|usl| (usl - stats.mean) / (3.0 * sigma));
    let lower_index = limits.lower.map(|lsl| (stats.mean - lsl) / (3.0 * sigma));
    let cpk = match (lower_index, upper_index) {
        (Some(l), Some(u)) => l.min(u),
        (Some(l), None) => l,
        (None, Some(u)) => u,
        (None, None) => return None,
    };
    let cp = limits
        .lower
        .zip(limits.upper)
        .map(|(lsl, usl)| (usl - lsl) / (6.0 * sigma));
    Some(ProcessCapability { cp, cpk })
}
