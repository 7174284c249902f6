//! Shared utilities for the QC lab crates.
//!
//! This crate provides the Polars helpers used across the workspace for
//! reading loosely typed spreadsheet columns and building derived columns.

pub mod frame;

pub use frame::{
    any_to_f64, any_to_string, any_to_string_non_empty, column_text_values, float_column,
    format_numeric, has_column, text_column,
};
