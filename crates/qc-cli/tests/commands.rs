//! Integration tests for the CLI commands.

use std::fs;
use std::path::Path;

use clap::Parser;
use qc_cli::cli::{Cli, Command};
use qc_cli::commands::{INLIERS_FILE, OUTLIERS_FILE, run_clean_report, run_lot, run_prepare};
use qc_cli::config::Settings;
use qc_model::{OutlierMethod, SampleCategory};

const HEADER: &str = "Receipt Date,Sample Name,Sample Type,Lot number,Test,Test description,\
Actual result,Lower limit,Upper limit,Category description,Spec description,Spec category,\
Charge department";

fn write_export(dir: &Path) -> std::path::PathBuf {
    let mut lines = vec![HEADER.to_string()];
    for value in ["1", "2", "3", "4", "5", "6", "7", "8", "9", "100"] {
        lines.push(format!(
            "2025-01-05,Sugar,RM - Raw material,020125-KIB08-291224-MBP,MO01,Moisture,{value},0,8,\
             Sweetener,Sugar spec,RM,QA.MBP"
        ));
    }
    lines.push(
        "20/03/2025,Biscuit,Finished Goods,150325-L2,AP01,Appearance,pending,,,Biscuit,Biscuit spec,FG,QA.MBP"
            .to_string(),
    );
    lines.push(
        "2025-01-06,Sugar,RM - Raw material,060125-KIB08,CQ01,Balance check,1,,,Sweetener,Sugar spec,RM,MFG.MBP"
            .to_string(),
    );
    let path = dir.join("results.csv");
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["qc-lab"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn prepare_writes_partitions_and_summarizes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path());
    let out = dir.path().join("out");
    let cli = parse(&[
        "prepare",
        input.to_str().unwrap(),
        "--output-dir",
        out.to_str().unwrap(),
    ]);
    let Command::Prepare(args) = &cli.command else {
        panic!("expected prepare command");
    };

    let result = run_prepare(args, &Settings::default()).unwrap();

    assert_eq!(result.total_rows, 12);
    assert_eq!(result.outlier_rows, 1);
    assert_eq!(result.inlier_rows, 10);
    assert_eq!(result.excluded_rows(), 1);
    assert!(out.join(INLIERS_FILE).exists());
    assert!(out.join(OUTLIERS_FILE).exists());

    let outliers = fs::read_to_string(out.join(OUTLIERS_FILE)).unwrap();
    assert_eq!(outliers.lines().count(), 2);
    assert!(outliers.lines().next().unwrap().ends_with("actual_result_numeric"));

    // Moisture values 9 is the only inlier above its upper limit of 8
    assert_eq!(result.pareto.len(), 1);
    assert_eq!(result.pareto[0].test, "Moisture");
    assert_eq!(result.pareto[0].count, 1);
    assert_eq!(result.limits.upper, Some(8.0));
}

#[test]
fn prepare_dry_run_with_filters_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path());
    let cli = parse(&[
        "prepare",
        input.to_str().unwrap(),
        "--dry-run",
        "--method",
        "std",
        "--factor",
        "2",
        "--test",
        "Moisture",
        "--from",
        "2025-01-01",
        "--to",
        "2025-01-31",
    ]);
    let Command::Prepare(args) = &cli.command else {
        panic!("expected prepare command");
    };

    let result = run_prepare(args, &Settings::default()).unwrap();

    assert!(result.output_dir.is_none());
    assert!(!dir.path().join("output").exists());
    let bounds = result.bounds.unwrap();
    assert_eq!(bounds.method, OutlierMethod::Std);
    assert_eq!(bounds.factor, 2.0);
    assert_eq!(result.filtered_outlier_rows, 1);
    assert_eq!(result.filtered_inlier_rows, 9);
    let stats = result.stats.unwrap();
    assert_eq!(stats.count, 9);
}

#[test]
fn prepare_rejects_invalid_factor() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path());
    let cli = parse(&["prepare", input.to_str().unwrap(), "--factor", "0", "--dry-run"]);
    let Command::Prepare(args) = &cli.command else {
        panic!("expected prepare command");
    };
    assert!(run_prepare(args, &Settings::default()).is_err());
}

#[test]
fn clean_report_drops_excluded_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("clean.csv");
    let cli = parse(&[
        "clean-report",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    let Command::CleanReport(args) = &cli.command else {
        panic!("expected clean-report command");
    };

    let result = run_clean_report(args, &Settings::default()).unwrap();

    assert_eq!(result.input_rows, 12);
    assert_eq!(result.output_rows, 11);
    let header = fs::read_to_string(&output).unwrap();
    assert!(!header.lines().next().unwrap().contains("Charge department"));
}

#[test]
fn lot_command_parses_single_code() {
    let cli = parse(&["lot", "020125-KIB08-291224-MBP", "--sample-type", "RM"]);
    let Command::Lot(args) = &cli.command else {
        panic!("expected lot command");
    };
    let result = run_lot(args);
    assert_eq!(result.category, SampleCategory::RawMaterial);
    assert_eq!(result.info.supplier_name.as_deref(), Some("KIB08"));
    assert_eq!(
        result.final_date.map(|d| d.to_string()).as_deref(),
        Some("2025-01-02")
    );
}
