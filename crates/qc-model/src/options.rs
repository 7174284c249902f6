//! Configuration options for result preparation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::{ModelError, Result};

/// How outlier bounds are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutlierMethod {
    /// `Q1 - f*IQR` .. `Q3 + f*IQR` with linearly interpolated quartiles.
    #[default]
    #[serde(rename = "IQR", alias = "iqr")]
    Iqr,
    /// `mean - f*std` .. `mean + f*std` with the sample standard deviation.
    #[serde(rename = "std", alias = "STD")]
    Std,
}

impl OutlierMethod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Iqr => "IQR",
            Self::Std => "std",
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutlierMethod {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iqr" => Ok(Self::Iqr),
            "std" => Ok(Self::Std),
            _ => Err(ModelError::UnknownOutlierMethod(s.to_string())),
        }
    }
}

pub const DEFAULT_OUTLIER_FACTOR: f64 = 1.5;

/// Options for the outlier classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierOptions {
    pub method: OutlierMethod,
    /// Multiplier applied to the IQR or standard deviation.
    pub factor: f64,
    /// Column holding the result values.
    pub column: String,
}

impl Default for OutlierOptions {
    fn default() -> Self {
        Self {
            method: OutlierMethod::Iqr,
            factor: DEFAULT_OUTLIER_FACTOR,
            column: columns::ACTUAL_RESULT.to_string(),
        }
    }
}

impl OutlierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_method(mut self, method: OutlierMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Check the factor is a positive finite number and the column is named.
    pub fn validate(&self) -> Result<()> {
        if !(self.factor.is_finite() && self.factor > 0.0) {
            return Err(ModelError::InvalidFactor(self.factor));
        }
        if self.column.trim().is_empty() {
            return Err(ModelError::EmptyColumnName);
        }
        Ok(())
    }
}

/// Rules for cleaning the daily LIMS sample report before it is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportCleanup {
    /// Rows charged to these departments are dropped.
    pub excluded_departments: Vec<String>,
    /// Rows whose test code starts with one of these prefixes are dropped.
    pub excluded_test_prefixes: Vec<String>,
    /// Columns kept in the cleaned report, in order.
    pub keep_columns: Vec<String>,
}

impl Default for ReportCleanup {
    fn default() -> Self {
        Self {
            excluded_departments: vec!["MFG.MBP".to_string(), "SHE.MBP".to_string()],
            excluded_test_prefixes: vec!["CQ".to_string()],
            keep_columns: columns::REPORT_COLUMNS
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outlier_method_from_str() {
        assert_eq!("IQR".parse::<OutlierMethod>(), Ok(OutlierMethod::Iqr));
        assert_eq!(" std ".parse::<OutlierMethod>(), Ok(OutlierMethod::Std));
        assert!(matches!(
            "zscore".parse::<OutlierMethod>(),
            Err(ModelError::UnknownOutlierMethod(_))
        ));
    }

    #[test]
    fn test_default_options() {
        let options = OutlierOptions::default();
        assert_eq!(options.method, OutlierMethod::Iqr);
        assert_eq!(options.factor, 1.5);
        assert_eq!(options.column, "Actual result");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_factor() {
        assert_eq!(
            OutlierOptions::new().with_factor(0.0).validate(),
            Err(ModelError::InvalidFactor(0.0))
        );
        assert!(OutlierOptions::new().with_factor(f64::NAN).validate().is_err());
        assert_eq!(
            OutlierOptions::new().with_column(" ").validate(),
            Err(ModelError::EmptyColumnName)
        );
    }
}
