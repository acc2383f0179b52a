//! CLI argument definitions for the profile QC runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sonde-qc",
    version,
    about = "Radiosonde profile quality control",
    long_about = "Run consistency checks over radiosonde temperature profiles.\n\n\
                  Flags levels whose temperature disagrees with a log-pressure\n\
                  interpolation between neighbouring significant levels."
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
    /// Run quality control over the profiles of a CSV file.
    Run(RunArgs),

    /// List the registered checks.
    Checks,
}

#[derive(Parser)]
pub struct RunArgs {
    /// CSV file with one row per level.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// TOML file with QC options (defaults apply when omitted).
    #[arg(long = "options", value_name = "TOML")]
    pub options: Option<PathBuf>,

    /// Write a JSON report including each check's exported state.
    #[arg(long = "report", value_name = "JSON")]
    pub report: Option<PathBuf>,

    /// Write the levels with their flags to a CSV file.
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Checks to run, in order (overrides the options file).
    #[arg(long = "checks", value_name = "NAMES", value_delimiter = ',')]
    pub checks: Option<Vec<String>>,

    /// Only check the first N levels of each profile.
    #[arg(long = "max-levels", value_name = "N")]
    pub max_levels: Option<usize>,

    /// Compare exported check state with the `ref_` columns of the input.
    ///
    /// The exit code is 1 when any value disagrees.
    #[arg(long = "compare-reference")]
    pub compare_reference: bool,
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
