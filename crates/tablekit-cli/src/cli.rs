//! CLI argument definitions for tablekit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tablekit",
    version,
    about = "Sort, filter, and validate record data from the terminal",
    long_about = "Sort, filter, and validate record data from the terminal.\n\n\
                  Reads CSV or JSON record files, applies a free-text filter and\n\
                  single-column sort, and checks form values against declarative rules."
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
    /// Filter, sort, and page a CSV or JSON record file.
    Table(TableArgs),

    /// Submit form values against a rule file.
    Validate(ValidateArgs),

    /// Compile a rule file and list the fields it covers.
    CheckRules(CheckRulesArgs),
}

#[derive(Parser)]
pub struct TableArgs {
    /// Record file (.csv or .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Keep records where any searched field contains TEXT (case-insensitive).
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Restrict the filter to this field (repeatable).
    #[arg(long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Request a sort on KEY (repeatable; repeating a key cycles
    /// ascending, descending, unsorted).
    #[arg(long = "sort", value_name = "KEY")]
    pub sorts: Vec<String>,

    /// Disable sorting entirely.
    #[arg(long = "no-sort")]
    pub no_sort: bool,

    /// Page to show (1-based).
    #[arg(long = "page", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (0 shows all rows).
    #[arg(long = "page-size", default_value_t = 10)]
    pub page_size: usize,

    /// Print a JSON report instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Rule file: JSON object of field name to rule list.
    #[arg(long = "rules", value_name = "RULES")]
    pub rules: PathBuf,

    /// Values file: JSON object of field name to value.
    #[arg(long = "values", value_name = "VALUES")]
    pub values: PathBuf,

    /// Print a JSON report instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CheckRulesArgs {
    /// Rule file to compile.
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,
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
