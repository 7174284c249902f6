//! Outlier classification.
//!
//! Records with a numeric result are split into inliers and outliers by a
//! distributional bound. Records without a numeric result belong to
//! neither side, except in the degenerate case where no bound can be
//! computed and the whole table is returned as inliers.

use polars::prelude::*;
use qc_common::{any_to_f64, has_column};
use qc_model::columns::{ACTUAL_RESULT, ACTUAL_RESULT_NUMERIC};
use qc_model::{OutlierMethod, OutlierOptions};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::numeric::normalize_result;

/// Lower and upper bound of the inlier band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierBounds {
    pub method: OutlierMethod,
    pub factor: f64,
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// A value is an outlier iff it lies strictly outside the band.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Quantile of sorted values with linear interpolation between closest ranks.
///
/// `q` is clamped to `[0, 1]`. Returns `None` for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower_idx = position.floor() as usize;
    let upper_idx = position.ceil() as usize;
    let weight = position - lower_idx as f64;
    Some(sorted[lower_idx] + weight * (sorted[upper_idx] - sorted[lower_idx]))
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N-1 denominator). `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Compute the inlier band for a set of values.
///
/// Returns `None` when `values` is empty. With a single value the standard
/// deviation method collapses the band onto the mean.
pub fn compute_bounds(values: &[f64], options: &OutlierOptions) -> Option<OutlierBounds> {
    let factor = options.factor;
    let (lower, upper) = match options.method {
        OutlierMethod::Iqr => {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            let q1 = quantile(&sorted, 0.25)?;
            let q3 = quantile(&sorted, 0.75)?;
            let iqr = q3 - q1;
            (q1 - factor * iqr, q3 + factor * iqr)
        }
        OutlierMethod::Std => {
            let mean = mean(values)?;
            let std = sample_std(values).unwrap_or(0.0);
            (mean - factor * std, mean + factor * std)
        }
    };
    Some(OutlierBounds {
        method: options.method,
        factor,
        lower,
        upper,
    })
}

/// Row indices on each side of the partition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlierPartition {
    pub inliers: Vec<usize>,
    pub outliers: Vec<usize>,
    /// `None` when no bound could be computed (degenerate input).
    pub bounds: Option<OutlierBounds>,
}

/// Partition row values into inliers and outliers.
///
/// Rows with `None` are in neither list. If no row has a value, every row
/// index is returned as an inlier and `bounds` is `None`.
pub fn partition_values(values: &[Option<f64>], options: &OutlierOptions) -> OutlierPartition {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let Some(bounds) = compute_bounds(&present, options) else {
        return OutlierPartition {
            inliers: (0..values.len()).collect(),
            outliers: Vec::new(),
            bounds: None,
        };
    };

    let mut partition = OutlierPartition {
        bounds: Some(bounds),
        ..OutlierPartition::default()
    };
    for (idx, value) in values.iter().enumerate() {
        match value {
            Some(v) if bounds.is_outlier(*v) => partition.outliers.push(idx),
            Some(_) => partition.inliers.push(idx),
            None => {}
        }
    }
    partition
}

/// Read a column as optional numbers.
///
/// Text columns go through [`normalize_result`]; numeric columns convert
/// directly. Returns `None` when the column is missing or has a type that
/// cannot hold numbers.
pub fn coerce_numeric_column(df: &DataFrame, name: &str) -> Option<Vec<Option<f64>>> {
    let column = df.column(name).ok()?;
    let value_at = |idx: usize| column.get(idx).unwrap_or(AnyValue::Null);
    let values = match column.dtype() {
        DataType::String => (0..df.height())
            .map(|idx| match value_at(idx) {
                AnyValue::String(s) => normalize_result(s),
                AnyValue::StringOwned(s) => normalize_result(s.as_str()),
                _ => None,
            })
            .collect(),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => (0..df.height()).map(|idx| any_to_f64(value_at(idx))).collect(),
        _ => return None,
    };
    Some(values)
}

/// Inlier and outlier tables produced from one input table.
#[derive(Debug, Clone)]
pub struct FrameSplit {
    pub inliers: DataFrame,
    pub outliers: DataFrame,
    pub bounds: Option<OutlierBounds>,
}

impl FrameSplit {
    fn unchanged(df: &DataFrame) -> Self {
        Self {
            inliers: df.clone(),
            outliers: df.head(Some(0)),
            bounds: None,
        }
    }
}

/// Column the classifier actually reads.
///
/// On a prepared table the raw result column is classified through its
/// derived numeric column, so rows are split on the value they are
/// published with.
pub fn classifier_column<'a>(df: &DataFrame, column: &'a str) -> &'a str {
    if column == ACTUAL_RESULT && has_column(df, ACTUAL_RESULT_NUMERIC) {
        ACTUAL_RESULT_NUMERIC
    } else {
        column
    }
}

/// Split a table into inliers and outliers on `options.column`.
///
/// When the column is missing, not numeric, or holds no numeric values, the
/// table is returned unchanged as inliers with an empty outlier table.
pub fn split_outliers(df: &DataFrame, options: &OutlierOptions) -> Result<FrameSplit> {
    options.validate()?;

    let column = classifier_column(df, &options.column);
    let Some(values) = coerce_numeric_column(df, column) else {
        warn!(
            column = %column,
            "outlier column missing or not numeric, all rows kept as inliers"
        );
        return Ok(FrameSplit::unchanged(df));
    };

    let partition = partition_values(&values, options);
    let Some(bounds) = partition.bounds else {
        warn!(
            column = %column,
            "no numeric results, all rows kept as inliers"
        );
        return Ok(FrameSplit::unchanged(df));
    };

    let mut inlier_mask = vec![false; df.height()];
    let mut outlier_mask = vec![false; df.height()];
    for idx in &partition.inliers {
        inlier_mask[*idx] = true;
    }
    for idx in &partition.outliers {
        outlier_mask[*idx] = true;
    }

    let inliers = df.filter(&BooleanChunked::from_slice("inlier".into(), &inlier_mask))?;
    let outliers = df.filter(&BooleanChunked::from_slice("outlier".into(), &outlier_mask))?;

    debug!(
        column = %column,
        method = %bounds.method,
        lower = bounds.lower,
        upper = bounds.upper,
        inliers = inliers.height(),
        outliers = outliers.height(),
        excluded = df.height() - inliers.height() - outliers.height(),
        "classified outliers"
    );

    Ok(FrameSplit {
        inliers,
        outliers,
        bounds: Some(bounds),
    })
}
