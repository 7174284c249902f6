//! CLI argument definitions for the QC lab tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use qc_model::OutlierMethod;

#[derive(Parser)]
#[command(
    name = "qc-lab",
    version,
    about = "QC lab results - prepare lab exports for the quality dashboard",
    long_about = "Prepare QC lab result exports for the quality dashboard.\n\n\
                  Derives warehouse and supplier dates from lot codes, normalizes\n\
                  free-text results and separates outliers from inliers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prepare a lab result export and split it into inliers and outliers.
    Prepare(PrepareArgs),

    /// Clean a raw daily sample report export.
    CleanReport(CleanReportArgs),

    /// Parse a single lot code.
    Lot(LotArgs),
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// Lab result CSV export.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Output directory for inliers.csv and outliers.csv (default: <CSV dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Outlier method (overrides the settings file).
    #[arg(long = "method", value_enum)]
    pub method: Option<MethodArg>,

    /// Outlier factor (overrides the settings file).
    #[arg(long = "factor", value_name = "FACTOR")]
    pub factor: Option<f64>,

    /// Column holding the result values (overrides the settings file).
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    /// Keep only these category descriptions (repeatable).
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Keep only these sample types (repeatable).
    #[arg(long = "sample-type", value_name = "NAME")]
    pub sample_types: Vec<String>,

    /// Keep only these spec descriptions (repeatable).
    #[arg(long = "spec", value_name = "NAME")]
    pub specs: Vec<String>,

    /// Keep only these test descriptions (repeatable).
    #[arg(long = "test", value_name = "NAME")]
    pub tests: Vec<String>,

    /// First final date to keep (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub date_from: Option<NaiveDate>,

    /// Last final date to keep (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE")]
    pub date_to: Option<NaiveDate>,

    /// Report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CleanReportArgs {
    /// Raw sample report CSV export.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Cleaned CSV path.
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct LotArgs {
    /// Lot code, e.g. 020125-KIB08-291224-MBP.
    #[arg(value_name = "LOT")]
    pub lot: String,

    /// Sample type label used to pick the lot layout.
    #[arg(long = "sample-type", value_name = "TYPE")]
    pub sample_type: Option<String>,

    /// Receipt date, used for the final date of non-incoming samples.
    #[arg(long = "receipt-date", value_name = "DATE")]
    pub receipt_date: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Iqr,
    Std,
}

impl From<MethodArg> for OutlierMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Iqr => Self::Iqr,
            MethodArg::Std => Self::Std,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
