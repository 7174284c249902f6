//! Dashboard filters over a prepared table.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use polars::prelude::*;
use qc_common::column_text_values;
use qc_model::columns::{
    CATEGORY_DESCRIPTION, DATE_FORMAT, FINAL_DATE, SAMPLE_TYPE, SPEC_DESCRIPTION,
    TEST_DESCRIPTION,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Multi-select and date range filter.
///
/// An empty selection does not filter. A non-empty selection keeps rows
/// whose cell equals one of the selected values; rows with an empty cell or
/// a missing column are dropped. The date range is inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    pub categories: BTreeSet<String>,
    pub sample_types: BTreeSet<String>,
    pub specs: BTreeSet<String>,
    pub tests: BTreeSet<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_sample_types<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample_types = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_specs<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specs = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_tests<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tests = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.sample_types.is_empty()
            && self.specs.is_empty()
            && self.tests.is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    fn has_date_range(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    fn date_in_range(&self, date: NaiveDate) -> bool {
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }

    /// Keep the rows of `df` matching every active criterion.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        if self.is_empty() {
            return Ok(df.clone());
        }

        let mut keep = vec![true; df.height()];
        let selections = [
            (CATEGORY_DESCRIPTION, &self.categories),
            (SAMPLE_TYPE, &self.sample_types),
            (SPEC_DESCRIPTION, &self.specs),
            (TEST_DESCRIPTION, &self.tests),
        ];
        for (column, selected) in selections {
            if selected.is_empty() {
                continue;
            }
            match column_text_values(df, column) {
                Some(values) => {
                    for (flag, value) in keep.iter_mut().zip(values) {
                        *flag &= value.is_some_and(|v| selected.contains(&v));
                    }
                }
                None => {
                    warn!(column, "filter column missing, no rows match");
                    keep.fill(false);
                }
            }
        }

        if self.has_date_range() {
            match column_text_values(df, FINAL_DATE) {
                Some(values) => {
                    for (flag, value) in keep.iter_mut().zip(values) {
                        let date = value
                            .as_deref()
                            .and_then(|v| NaiveDate::parse_from_str(v, DATE_FORMAT).ok());
                        *flag &= date.is_some_and(|d| self.date_in_range(d));
                    }
                }
                None => {
                    warn!(column = FINAL_DATE, "filter column missing, no rows match");
                    keep.fill(false);
                }
            }
        }

        let filtered = df.filter(&BooleanChunked::from_slice("filter".into(), &keep))?;
        debug!(
            rows_before = df.height(),
            rows_after = filtered.height(),
            "filter applied"
        );
        Ok(filtered)
    }
}
