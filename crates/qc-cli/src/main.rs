//! QC lab CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use qc_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use qc_cli::commands::{run_clean_report, run_lot, run_prepare};
use qc_cli::config::Settings;
use qc_cli::logging::{LogConfig, LogFormat, init_logging};
use qc_cli::summary::{print_clean_summary, print_lot, print_prepare_summary};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Prepare(args) => {
            let settings = Settings::resolve(cli.config.as_deref())?;
            let result = run_prepare(args, &settings)?;
            print_prepare_summary(&result);
        }
        Command::CleanReport(args) => {
            let settings = Settings::resolve(cli.config.as_deref())?;
            let result = run_clean_report(args, &settings)?;
            print_clean_summary(&result);
        }
        Command::Lot(args) => print_lot(&run_lot(args)),
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level_filter(cli.verbosity.tracing_level_filter());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone())
}
