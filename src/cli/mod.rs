//! Command-line parsing for the series analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the statistics code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::InputFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "insight", version, about = "Economic time-series feature extraction")]
pub struct Cli {
    /// Log debug output from every analysis stage.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a series stored in a CSV or JSON file.
    Analyze(AnalyzeArgs),
    /// Fetch a series from FRED and analyze it (needs FRED_API_KEY).
    Fred(FredArgs),
}

/// Options shared by every command that produces an analysis.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Only keep observations on or after this date (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Only keep observations on or before this date (YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Print the analysis as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Also write the analysis JSON to this path.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Series file with `date` and `value` columns (CSV) or `{date, value}` objects (JSON).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Input format.
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    /// Indicator name used in the report (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,

    /// Unit label used in the report.
    #[arg(long)]
    pub unit: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct FredArgs {
    /// FRED series id (e.g. CPIAUCSL).
    #[arg(short = 's', long = "series")]
    pub series_id: String,

    /// Indicator name used in the report (defaults to the FRED title).
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}
