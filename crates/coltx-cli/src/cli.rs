//! CLI argument definitions for the coltx runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "coltx",
    version,
    about = "Apply column transformer pipelines to CSV files",
    long_about = "Apply column transformer pipelines to CSV files.\n\n\
                  A pipeline is a JSON document listing transformer entries; each entry \
                  names its kind under \"type\" and carries its arguments."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Fit a pipeline on a CSV file and write the transformed data.
    Run(RunArgs),

    /// Show the columns and data types of a CSV file.
    Schema(SchemaArgs),

    /// List the transformer kinds available in pipeline documents.
    Kinds,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Input CSV file.
    #[arg(long = "input", short = 'i', value_name = "CSV")]
    pub input: PathBuf,

    /// Pipeline JSON document.
    #[arg(long = "pipeline", short = 'p', value_name = "JSON")]
    pub pipeline: PathBuf,

    /// Output CSV file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Input CSV file.
    #[arg(long = "input", short = 'i', value_name = "CSV")]
    pub input: PathBuf,
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
