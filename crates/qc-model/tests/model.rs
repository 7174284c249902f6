//! Tests for qc-model types.

use qc_model::{OutlierMethod, OutlierOptions, ReportCleanup, SampleCategory};

#[test]
fn outlier_options_deserialize_from_toml() {
    let options: OutlierOptions = toml::from_str(
        r#"
        method = "std"
        factor = 3.0
        "#,
    )
    .expect("parse options");
    assert_eq!(options.method, OutlierMethod::Std);
    assert_eq!(options.factor, 3.0);
    // Missing keys fall back to defaults
    assert_eq!(options.column, "Actual result");
}

#[test]
fn outlier_method_serializes_with_dashboard_names() {
    let json = serde_json::to_string(&OutlierMethod::Iqr).expect("serialize");
    assert_eq!(json, "\"IQR\"");
    let method: OutlierMethod = serde_json::from_str("\"iqr\"").expect("alias");
    assert_eq!(method, OutlierMethod::Iqr);
}

#[test]
fn report_cleanup_defaults() {
    let cleanup = ReportCleanup::default();
    assert_eq!(cleanup.excluded_departments, vec!["MFG.MBP", "SHE.MBP"]);
    assert_eq!(cleanup.excluded_test_prefixes, vec!["CQ"]);
    assert_eq!(cleanup.keep_columns.len(), 11);
    assert_eq!(cleanup.keep_columns[0], "Receipt Date");
}

#[test]
fn sample_category_serializes_snake_case() {
    let json = serde_json::to_string(&SampleCategory::RawMaterial).expect("serialize");
    assert_eq!(json, "\"raw_material\"");
}
