//! Pareto breakdown of out-of-spec results.

use std::collections::BTreeMap;

use polars::prelude::*;
use qc_common::column_text_values;
use qc_model::columns::{LOWER_LIMIT, TEST_DESCRIPTION, UPPER_LIMIT};
use serde::Serialize;

use crate::stats::{SpecLimits, parse_limit, result_values_by_row};

/// One bar of the Pareto chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoEntry {
    pub test: String,
    pub count: usize,
    /// Share of all out-of-spec results up to and including this entry.
    pub cumulative_percent: f64,
}

/// Count out-of-spec results per test description.
///
/// Each row is checked against its own limits. Rows without a numeric
/// result, without limits or without a test description are skipped.
/// Entries are sorted by count, largest first, then by test name.
pub fn out_of_spec_pareto(df: &DataFrame) -> Vec<ParetoEntry> {
    let (Some(tests), Some(values)) = (
        column_text_values(df, TEST_DESCRIPTION),
        result_values_by_row(df),
    ) else {
        return Vec::new();
    };
    let limit_column = |name: &str| {
        column_text_values(df, name)
            .unwrap_or_else(|| vec![None; df.height()])
            .into_iter()
            .map(|raw| raw.as_deref().and_then(parse_limit))
            .collect::<Vec<_>>()
    };
    let lowers = limit_column(LOWER_LIMIT);
    let uppers = limit_column(UPPER_LIMIT);

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for (idx, (test, value)) in tests.into_iter().zip(values).enumerate() {
        let (Some(test), Some(value)) = (test, value) else {
            continue;
        };
        let limits = SpecLimits {
            lower: lowers[idx],
            upper: uppers[idx],
        };
        if limits.is_out_of_spec(value) {
            *counts.entry(test).or_default() += 1;
        }
    }

    let total: usize = counts.values().sum();
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // BTreeMap order is by name, so a stable sort on count keeps ties sorted
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut running = 0;
    ranked
        .into_iter()
        .map(|(test, count)| {
            running += count;
            ParetoEntry {
                test,
                count,
                cumulative_percent: running as f64 * 100.0 / total as f64,
            }
        })
        .collect()
}
