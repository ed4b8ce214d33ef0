//! CLI argument definitions for the eCRF mapper.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ecrf_cli::workflow::{Assignment, parse_delimiter};
use ecrf_core::ExportPolicy;

#[derive(Parser)]
#[command(
    name = "ecrf-mapper",
    version,
    about = "Map vendor CSV/Excel exports onto eCRF study schemas",
    long_about = "Map the columns of a vendor CSV or Excel export onto a study's eCRF schema.\n\n\
                  Columns are matched automatically by name, can be adjusted by hand,\n\
                  validated row by row and exported as a CSV whose headers are the\n\
                  schema field names."
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

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Study catalog replacing the built-in one.
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
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

    /// Allow cell values in trace logs. They are redacted otherwise.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the studies of the catalog.
    Studies,

    /// List the sheets of an Excel workbook.
    Sheets(SheetsArgs),

    /// Map, validate and export one CSV or Excel file.
    Map(MapArgs),
}

#[derive(Args)]
pub struct SheetsArgs {
    /// Path to the .xlsx or .xls file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct MapArgs {
    /// Input .csv, .xlsx or .xls file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Study whose schema the columns are mapped onto (default: first in catalog).
    #[arg(long = "study", value_name = "ID")]
    pub study: Option<String>,

    /// Worksheet to read (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// CSV field delimiter; `tab` selects a tab.
    #[arg(long = "delimiter", value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Map a column to a field, or clear it with `COLUMN=`. Repeatable.
    #[arg(long = "set", value_name = "COLUMN=FIELD")]
    pub assignments: Vec<Assignment>,

    /// Add a custom optional field to the working schema. Repeatable.
    #[arg(long = "add-field", value_name = "NAME")]
    pub add_fields: Vec<String>,

    /// Remove a field from the working schema. Repeatable.
    #[arg(long = "remove-field", value_name = "NAME")]
    pub remove_fields: Vec<String>,

    /// Validate rows and report findings even when the policy does not need it.
    #[arg(long = "validate")]
    pub validate: bool,

    /// Which rows to export relative to validation.
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Replace known raw values with the study's corrected terms.
    #[arg(long = "correct-values")]
    pub correct_values: bool,

    /// Write the export to this exact path.
    #[arg(long = "output", value_name = "PATH", conflicts_with = "output_dir")]
    pub output: Option<PathBuf>,

    /// Directory for a timestamped export file (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Map and validate without writing the export.
    #[arg(long = "dry-run", conflicts_with_all = ["output", "output_dir"])]
    pub dry_run: bool,

    /// Print the report as JSON on stdout.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    All,
    ValidOnly,
    Block,
}

impl From<PolicyArg> for ExportPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::All => Self::All,
            PolicyArg::ValidOnly => Self::ValidOnly,
            PolicyArg::Block => Self::Block,
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
