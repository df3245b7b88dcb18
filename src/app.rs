//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads the series (file or FRED)
//! - runs the analysis pipeline
//! - prints the report and writes optional exports

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{AnalyzeArgs, Cli, Command, FredArgs, OutputArgs};
use crate::error::AppError;
use crate::io::ingest::SourceConfig;
use crate::io::{analysis_file, analysis_json_string, write_analysis_json};

pub mod pipeline;

/// Where the series comes from.
#[derive(Debug, Clone)]
pub enum SeriesSource {
    File(SourceConfig),
    Fred {
        series_id: String,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

/// A run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub source: SeriesSource,
    pub indicator: Option<String>,
    pub unit: Option<String>,
    pub json: bool,
    pub export: Option<std::path::PathBuf>,
}

/// Entry point for the `insight` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = match cli.command {
        Command::Analyze(args) => analyze_config_from_args(&args),
        Command::Fred(args) => fred_config_from_args(&args),
    };
    handle_analyze(&config)
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_analyze(config: &AnalyzeConfig) -> Result<(), AppError> {
    let run = pipeline::run_analysis(config)?;
    let file = analysis_file(&run.indicator, run.unit.as_deref(), &run.analysis);

    if config.json {
        println!("{}", analysis_json_string(&file)?);
    } else {
        println!(
            "{}",
            crate::report::format_analysis(&run.indicator, run.unit.as_deref(), &run.analysis)
        );
        if !run.row_errors.is_empty() {
            println!(
                "({} input row(s) skipped; rerun with -v for details)",
                run.row_errors.len()
            );
        }
    }

    if let Some(path) = &config.export {
        write_analysis_json(path, &file)?;
    }

    Ok(())
}

pub fn analyze_config_from_args(args: &AnalyzeArgs) -> AnalyzeConfig {
    AnalyzeConfig {
        source: SeriesSource::File(SourceConfig {
            path: args.input.clone(),
            format: args.format,
            start: args.output.start,
            end: args.output.end,
        }),
        indicator: args.name.clone(),
        unit: args.unit.clone(),
        json: args.output.json,
        export: args.output.export.clone(),
    }
}

pub fn fred_config_from_args(args: &FredArgs) -> AnalyzeConfig {
    let OutputArgs { start, end, json, export } = args.output.clone();
    AnalyzeConfig {
        source: SeriesSource::Fred {
            series_id: args.series_id.clone(),
            start,
            end,
        },
        indicator: args.name.clone(),
        unit: None,
        json,
        export,
    }
}
